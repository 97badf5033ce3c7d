use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use collection_actor::ActorClient;
use factory_floor::analysis::{analyze, GeminiSummarizer};
use factory_floor::clock::Clock;
use factory_floor::config::{PlantConfig, DEFAULT_CONFIG_FILE};
use factory_floor::lifecycle::{setup_tracing, PlantClients, PlantSystem};
use factory_floor::metrics::MetricsService;
use factory_floor::model::{
    parse_skills, MachineCreate, MachineStatus, MachineUpdate, MaintenanceRecord, MaintenanceType,
    MaterialCreate, OperatorCreate, OrderCreate, OrderStatus, ProcessCreate, QualityReportCreate,
    Shift, StepCreate, TraceabilityEventCreate, TraceabilityKind,
};
use factory_floor::planning;
use factory_floor::reports;
use factory_floor::storage::JsonStore;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "factory-floor")]
#[command(version, about = "Manufacturing operations back office")]
struct Cli {
    /// Configuration file (defaults to ./factory-floor.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory of the collection files. Overrides the configuration.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Production orders
    Orders {
        #[command(subcommand)]
        command: OrderCommands,
    },
    /// Machine fleet and maintenance
    Machines {
        #[command(subcommand)]
        command: MachineCommands,
    },
    /// Raw material stock
    Materials {
        #[command(subcommand)]
        command: MaterialCommands,
    },
    /// Personnel
    Operators {
        #[command(subcommand)]
        command: OperatorCommands,
    },
    /// Quality control reports
    Quality {
        #[command(subcommand)]
        command: QualityCommands,
    },
    /// Manufacturing process definitions
    Processes {
        #[command(subcommand)]
        command: ProcessCommands,
    },
    /// Order history
    Traceability {
        #[command(subcommand)]
        command: TraceabilityCommands,
    },
    /// Dashboard KPIs
    Metrics,
    /// Dashboard overview for a date range
    Period { start: NaiveDate, end: NaiveDate },
    /// Gantt layout for the months from START to END
    Timeline {
        start: NaiveDate,
        end: NaiveDate,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// AI-written production analysis (HTML)
    Analyze,
}

#[derive(Subcommand)]
enum OrderCommands {
    List,
    /// Matching orders, earliest due date first
    Search { term: String },
    Add(OrderArgs),
    Status { id: String, status: OrderStatusArg },
    /// Record the produced quantity
    Produce {
        id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Place the order on one machine
    Schedule {
        id: String,
        machine: String,
        start: NaiveDate,
        due: NaiveDate,
    },
    Delete { id: String },
}

#[derive(Args)]
struct OrderArgs {
    #[arg(long)]
    product: String,
    #[arg(long)]
    reference: String,
    #[arg(long)]
    quantity: u32,
    #[arg(long)]
    start: NaiveDate,
    #[arg(long)]
    due: NaiveDate,
    #[arg(long = "machine")]
    machines: Vec<String>,
    #[arg(long = "operator")]
    operators: Vec<String>,
}

#[derive(Subcommand)]
enum MachineCommands {
    List,
    /// Fleet statistics
    Stats,
    Add(MachineArgs),
    Status { id: String, status: MachineStatusArg },
    /// Append a maintenance log entry
    Maintain {
        id: String,
        #[arg(long, value_enum)]
        kind: MaintenanceArg,
        #[arg(long)]
        description: String,
        #[arg(long)]
        technician: String,
        /// Defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Edit efficiency, hour counters or the next maintenance date
    Counters {
        id: String,
        #[arg(long)]
        efficiency: Option<f64>,
        #[arg(long)]
        operating_time: Option<f64>,
        #[arg(long)]
        downtime: Option<f64>,
        #[arg(long)]
        next_maintenance: Option<NaiveDate>,
    },
    Delete { id: String },
}

#[derive(Args)]
struct MachineArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    reference: String,
    #[arg(long = "type")]
    machine_type: String,
    #[arg(long)]
    function: String,
    #[arg(long)]
    capacity: String,
    #[arg(long)]
    purchase_cost: f64,
    #[arg(long, value_enum, default_value = "idle")]
    status: MachineStatusArg,
}

#[derive(Subcommand)]
enum MaterialCommands {
    List,
    /// Materials at or below their threshold
    Low,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        stock: f64,
        #[arg(long)]
        unit: String,
        #[arg(long)]
        min_threshold: f64,
        #[arg(long)]
        daily_consumption: Option<f64>,
        #[arg(long)]
        unit_cost: Option<f64>,
    },
    /// Add (or with a negative value, remove) stock
    Adjust {
        id: String,
        #[arg(allow_negative_numbers = true)]
        delta: f64,
    },
    Delete { id: String },
}

#[derive(Subcommand)]
enum OperatorCommands {
    List,
    /// Workforce statistics
    Stats,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        role: String,
        #[arg(long, value_enum)]
        shift: ShiftArg,
        /// Comma-separated
        #[arg(long, default_value = "")]
        skills: String,
        #[arg(long)]
        salary: f64,
    },
    Presence {
        id: String,
        #[arg(action = clap::ArgAction::Set)]
        present: bool,
    },
    Delete { id: String },
}

#[derive(Subcommand)]
enum QualityCommands {
    List,
    /// Totals and reject rates
    Summary,
    Add {
        #[arg(long)]
        order: String,
        #[arg(long)]
        checked: u32,
        #[arg(long)]
        rejected: u32,
        #[arg(long)]
        reason: Option<String>,
        #[arg(long)]
        inspector: String,
    },
    Delete { id: String },
}

#[derive(Subcommand)]
enum ProcessCommands {
    List,
    Add {
        #[arg(long)]
        reference: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "1.0")]
        version: String,
    },
    AddStep {
        process: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        machine_type: String,
        /// Minutes
        #[arg(long)]
        standard_time: f64,
        #[arg(long, default_value = "")]
        instructions: String,
    },
    RemoveStep { process: String, step: String },
    Delete { id: String },
}

#[derive(Subcommand)]
enum TraceabilityCommands {
    /// Events of one order, oldest first
    Events { order: String },
    /// Orders matching a term
    Orders {
        #[arg(default_value = "")]
        term: String,
    },
    Record {
        #[arg(long)]
        order: String,
        #[arg(long, value_enum)]
        kind: TraceabilityArg,
        #[arg(long)]
        description: String,
        #[arg(long)]
        actor: String,
        /// KEY=VALUE, repeatable
        #[arg(long = "detail", value_parser = parse_detail)]
        details: Vec<(String, String)>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderStatusArg {
    Planned,
    InProgress,
    Completed,
    Delayed,
}

impl From<OrderStatusArg> for OrderStatus {
    fn from(arg: OrderStatusArg) -> Self {
        match arg {
            OrderStatusArg::Planned => OrderStatus::Planned,
            OrderStatusArg::InProgress => OrderStatus::InProgress,
            OrderStatusArg::Completed => OrderStatus::Completed,
            OrderStatusArg::Delayed => OrderStatus::Delayed,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum MachineStatusArg {
    Running,
    Idle,
    Down,
    Maintenance,
}

impl From<MachineStatusArg> for MachineStatus {
    fn from(arg: MachineStatusArg) -> Self {
        match arg {
            MachineStatusArg::Running => MachineStatus::Running,
            MachineStatusArg::Idle => MachineStatus::Idle,
            MachineStatusArg::Down => MachineStatus::Down,
            MachineStatusArg::Maintenance => MachineStatus::Maintenance,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum MaintenanceArg {
    Preventive,
    Corrective,
}

impl From<MaintenanceArg> for MaintenanceType {
    fn from(arg: MaintenanceArg) -> Self {
        match arg {
            MaintenanceArg::Preventive => MaintenanceType::Preventive,
            MaintenanceArg::Corrective => MaintenanceType::Corrective,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ShiftArg {
    Morning,
    Afternoon,
    Night,
}

impl From<ShiftArg> for Shift {
    fn from(arg: ShiftArg) -> Self {
        match arg {
            ShiftArg::Morning => Shift::Morning,
            ShiftArg::Afternoon => Shift::Afternoon,
            ShiftArg::Night => Shift::Night,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum TraceabilityArg {
    Material,
    Process,
    Quality,
    Dispatch,
}

impl From<TraceabilityArg> for TraceabilityKind {
    fn from(arg: TraceabilityArg) -> Self {
        match arg {
            TraceabilityArg::Material => TraceabilityKind::Material,
            TraceabilityArg::Process => TraceabilityKind::Process,
            TraceabilityArg::Quality => TraceabilityKind::Quality,
            TraceabilityArg::Dispatch => TraceabilityKind::Dispatch,
        }
    }
}

fn parse_detail(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to encode output")?;
    println!("{out}");
    Ok(())
}

fn load_config(cli: &Cli) -> Result<PlantConfig> {
    let config = match &cli.config {
        Some(path) => PlantConfig::load(path)?,
        None => PlantConfig::load_or_default(&PathBuf::from(DEFAULT_CONFIG_FILE))?,
    };
    let mut config = config.with_env();
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();
    let cli = Cli::parse();

    let config = load_config(&cli).context("Failed to load configuration")?;
    let clock = cli.today.map(Clock::fixed).unwrap_or_default();

    let system = PlantSystem::start(
        JsonStore::new(config.data_dir.clone()),
        clock,
        config.channel_buffer,
    );
    let result = run(cli.command, &system, &config, clock).await;

    system.shutdown().await.context("Failed to shut down the plant")?;
    result
}

async fn run(command: Commands, system: &PlantSystem, config: &PlantConfig, clock: Clock) -> Result<()> {
    let clients = &system.clients;
    match command {
        Commands::Orders { command } => orders(clients, command).await,
        Commands::Machines { command } => machines(clients, command, clock).await,
        Commands::Materials { command } => materials(clients, command).await,
        Commands::Operators { command } => operators(clients, command).await,
        Commands::Quality { command } => quality(clients, command).await,
        Commands::Processes { command } => processes(clients, command).await,
        Commands::Traceability { command } => traceability(clients, command).await,
        Commands::Metrics => {
            let service = MetricsService::new(clients.clone(), system.revision(), clock);
            print_json(&service.metrics().await.context("Failed to compute metrics")?)
        }
        Commands::Period { start, end } => {
            let service = MetricsService::new(clients.clone(), system.revision(), clock);
            let report = service
                .period(start, end)
                .await
                .context("Failed to build period report")?;
            print_json(&report)
        }
        Commands::Timeline { start, end, search } => {
            let orders = clients.orders.list().await.context("Failed to list orders")?;
            print_json(&planning::layout(&orders, start, end, &search))
        }
        Commands::Analyze => {
            let snapshot = system.snapshot().await.context("Failed to read the plant")?;
            let summarizer = GeminiSummarizer::new(config.ai.clone())
                .context("Failed to build the AI client")?;
            info!(model = %config.ai.model, "Requesting production analysis");
            let html = analyze(
                &summarizer,
                &snapshot.orders,
                &snapshot.machines,
                &snapshot.materials,
            )
            .await;
            println!("{html}");
            Ok(())
        }
    }
}

async fn orders(clients: &PlantClients, command: OrderCommands) -> Result<()> {
    let orders = &clients.orders;
    match command {
        OrderCommands::List => print_json(&orders.list().await?),
        OrderCommands::Search { term } => print_json(&orders.search(&term).await?),
        OrderCommands::Add(args) => {
            let id = orders
                .add_order(OrderCreate {
                    product_name: args.product,
                    reference: args.reference,
                    quantity_planned: args.quantity,
                    start_date: args.start,
                    due_date: args.due,
                    assigned_machine_ids: args.machines,
                    assigned_operator_ids: args.operators,
                })
                .await
                .context("Failed to add order")?;
            print_json(&orders.get(id).await?)
        }
        OrderCommands::Status { id, status } => {
            print_json(&orders.update_status(id, status.into()).await?)
        }
        OrderCommands::Produce { id, quantity } => {
            print_json(&orders.update_produced_quantity(id, quantity).await?)
        }
        OrderCommands::Schedule {
            id,
            machine,
            start,
            due,
        } => print_json(&orders.schedule(id, machine, start, due).await?),
        OrderCommands::Delete { id } => Ok(orders.delete(id).await?),
    }
}

async fn machines(clients: &PlantClients, command: MachineCommands, clock: Clock) -> Result<()> {
    let machines = &clients.machines;
    match command {
        MachineCommands::List => print_json(&machines.list().await?),
        MachineCommands::Stats => print_json(&reports::fleet_stats(&machines.list().await?)),
        MachineCommands::Add(args) => {
            let id = machines
                .add_machine(MachineCreate {
                    name: args.name,
                    reference: args.reference,
                    machine_type: args.machine_type,
                    function: args.function,
                    capacity: args.capacity,
                    purchase_cost: args.purchase_cost,
                    status: args.status.into(),
                })
                .await
                .context("Failed to add machine")?;
            print_json(&machines.get(id).await?)
        }
        MachineCommands::Status { id, status } => {
            print_json(&machines.set_status(id, status.into()).await?)
        }
        MachineCommands::Maintain {
            id,
            kind,
            description,
            technician,
            date,
        } => {
            let record = MaintenanceRecord {
                date: date.unwrap_or_else(|| clock.today()),
                kind: kind.into(),
                description,
                technician,
            };
            print_json(&machines.log_maintenance(id, record).await?)
        }
        MachineCommands::Counters {
            id,
            efficiency,
            operating_time,
            downtime,
            next_maintenance,
        } => {
            let update = MachineUpdate {
                efficiency,
                operating_time,
                downtime,
                next_maintenance,
            };
            print_json(&machines.update_counters(id, update).await?)
        }
        MachineCommands::Delete { id } => Ok(machines.delete(id).await?),
    }
}

async fn materials(clients: &PlantClients, command: MaterialCommands) -> Result<()> {
    let materials = &clients.materials;
    match command {
        MaterialCommands::List => print_json(&materials.list().await?),
        MaterialCommands::Low => print_json(&materials.low_stock().await?),
        MaterialCommands::Add {
            name,
            stock,
            unit,
            min_threshold,
            daily_consumption,
            unit_cost,
        } => {
            let id = materials
                .add_material(MaterialCreate {
                    name,
                    stock,
                    unit,
                    min_threshold,
                    daily_consumption,
                    unit_cost,
                })
                .await
                .context("Failed to add material")?;
            print_json(&materials.get(id).await?)
        }
        MaterialCommands::Adjust { id, delta } => print_json(&materials.adjust_stock(id, delta).await?),
        MaterialCommands::Delete { id } => Ok(materials.delete(id).await?),
    }
}

async fn operators(clients: &PlantClients, command: OperatorCommands) -> Result<()> {
    let operators = &clients.operators;
    match command {
        OperatorCommands::List => print_json(&operators.list().await?),
        OperatorCommands::Stats => print_json(&reports::workforce_stats(&operators.list().await?)),
        OperatorCommands::Add {
            name,
            role,
            shift,
            skills,
            salary,
        } => {
            let id = operators
                .add_operator(OperatorCreate {
                    name,
                    role,
                    shift: shift.into(),
                    skills: parse_skills(&skills),
                    salary,
                })
                .await
                .context("Failed to add operator")?;
            print_json(&operators.get(id).await?)
        }
        OperatorCommands::Presence { id, present } => {
            print_json(&operators.set_presence(id, present).await?)
        }
        OperatorCommands::Delete { id } => Ok(operators.delete(id).await?),
    }
}

async fn quality(clients: &PlantClients, command: QualityCommands) -> Result<()> {
    let quality = &clients.quality;
    match command {
        QualityCommands::List => print_json(&quality.list().await?),
        QualityCommands::Summary => print_json(&reports::quality_summary(&quality.list().await?)),
        QualityCommands::Add {
            order,
            checked,
            rejected,
            reason,
            inspector,
        } => {
            let id = quality
                .add_report(QualityReportCreate {
                    order_id: order,
                    checked_quantity: checked,
                    rejected_quantity: rejected,
                    defect_reason: reason,
                    inspector,
                })
                .await
                .context("Failed to add quality report")?;
            print_json(&quality.get(id).await?)
        }
        QualityCommands::Delete { id } => Ok(quality.delete(id).await?),
    }
}

async fn processes(clients: &PlantClients, command: ProcessCommands) -> Result<()> {
    let processes = &clients.processes;
    match command {
        ProcessCommands::List => print_json(&processes.list().await?),
        ProcessCommands::Add {
            reference,
            name,
            version,
        } => {
            let id = processes
                .add_process(ProcessCreate {
                    product_reference: reference,
                    name,
                    version,
                    steps: Vec::new(),
                })
                .await
                .context("Failed to add process")?;
            print_json(&processes.get(id).await?)
        }
        ProcessCommands::AddStep {
            process,
            name,
            machine_type,
            standard_time,
            instructions,
        } => {
            let step = StepCreate {
                name,
                machine_type,
                standard_time,
                instructions,
            };
            print_json(&processes.add_step(process, step).await?)
        }
        ProcessCommands::RemoveStep { process, step } => {
            print_json(&processes.remove_step(process, step).await?)
        }
        ProcessCommands::Delete { id } => Ok(processes.delete(id).await?),
    }
}

async fn traceability(clients: &PlantClients, command: TraceabilityCommands) -> Result<()> {
    match command {
        TraceabilityCommands::Events { order } => {
            print_json(&clients.traceability.events_for_order(&order).await?)
        }
        TraceabilityCommands::Orders { term } => print_json(&clients.orders.find(&term).await?),
        TraceabilityCommands::Record {
            order,
            kind,
            description,
            actor,
            details,
        } => {
            let id = clients
                .traceability
                .record_event(TraceabilityEventCreate {
                    order_id: order,
                    timestamp: None,
                    kind: kind.into(),
                    description,
                    actor,
                    details: details.into_iter().collect::<BTreeMap<_, _>>(),
                })
                .await
                .context("Failed to record event")?;
            print_json(&clients.traceability.get(id).await?)
        }
    }
}
