//! [`CollectionEntity`] implementation for [`ProductionOrder`].

use super::actions::OrderAction;
use super::error::OrderError;
use crate::model::{OrderCreate, OrderStatus, OrderUpdate, ProductionOrder};
use async_trait::async_trait;
use collection_actor::CollectionEntity;

/// Progress percentage for `produced` out of `planned`, capped at 100.
pub fn progress_for(produced: u32, planned: u32) -> u8 {
    if planned == 0 {
        return 100;
    }
    let percent = (f64::from(produced) / f64::from(planned) * 100.0).round();
    percent.min(100.0) as u8
}

impl ProductionOrder {
    fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
        match status {
            OrderStatus::Completed => {
                self.progress = 100;
                self.quantity_produced = self.quantity_planned;
            }
            OrderStatus::InProgress if self.progress == 0 => self.progress = 1,
            _ => {}
        }
    }

    fn record_production(&mut self, quantity: i64) {
        let produced = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);
        let progress = progress_for(produced, self.quantity_planned);

        self.quantity_produced = produced;
        self.progress = progress;
        if progress >= 100 {
            self.status = OrderStatus::Completed;
        } else if progress > 0 && self.status == OrderStatus::Planned {
            self.status = OrderStatus::InProgress;
        }
    }
}

#[async_trait]
impl CollectionEntity for ProductionOrder {
    type Id = String;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = OrderAction;
    type ActionResult = ProductionOrder;
    type Context = ();
    type Error = OrderError;

    fn id(&self) -> &String {
        &self.id
    }

    /// New orders start planned, with nothing produced.
    fn from_create(id: String, params: OrderCreate, _ctx: &()) -> Result<Self, OrderError> {
        Ok(Self {
            id,
            product_name: params.product_name,
            reference: params.reference,
            quantity_planned: params.quantity_planned,
            quantity_produced: 0,
            start_date: params.start_date,
            due_date: params.due_date,
            status: OrderStatus::Planned,
            progress: 0,
            assigned_machine_ids: params.assigned_machine_ids,
            assigned_operator_ids: params.assigned_operator_ids,
        })
    }

    async fn on_update(&mut self, update: OrderUpdate, _ctx: &()) -> Result<(), OrderError> {
        if let Some(product_name) = update.product_name {
            self.product_name = product_name;
        }
        if let Some(reference) = update.reference {
            self.reference = reference;
        }
        if let Some(planned) = update.quantity_planned {
            self.quantity_planned = planned;
        }
        if let Some(operators) = update.assigned_operator_ids {
            self.assigned_operator_ids = operators;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &(),
    ) -> Result<ProductionOrder, OrderError> {
        match action {
            OrderAction::SetStatus(status) => self.set_status(status),
            OrderAction::RecordProduction(quantity) => self.record_production(quantity),
            OrderAction::Schedule {
                machine_id,
                start_date,
                due_date,
            } => {
                self.assigned_machine_ids = vec![machine_id];
                self.start_date = start_date;
                self.due_date = due_date;
            }
        }
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn order(planned: u32, produced: u32, status: OrderStatus, progress: u8) -> ProductionOrder {
        ProductionOrder {
            id: "OP-2023-001".into(),
            product_name: "Boîtier Métallique X500".into(),
            reference: "REF-BM-500".into(),
            quantity_planned: planned,
            quantity_produced: produced,
            start_date: NaiveDate::from_ymd_opt(2023, 10, 25).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2023, 10, 30).unwrap(),
            status,
            progress,
            assigned_machine_ids: vec!["M-01".into()],
            assigned_operator_ids: vec![],
        }
    }

    async fn act(order: &mut ProductionOrder, action: OrderAction) -> ProductionOrder {
        order.handle_action(action, &()).await.unwrap()
    }

    #[tokio::test]
    async fn completing_fills_the_order() {
        let mut o = order(5000, 3250, OrderStatus::InProgress, 65);
        let done = act(&mut o, OrderAction::SetStatus(OrderStatus::Completed)).await;
        assert_eq!(done.progress, 100);
        assert_eq!(done.quantity_produced, 5000);
    }

    #[tokio::test]
    async fn starting_an_untouched_order_marks_one_percent() {
        let mut o = order(1200, 0, OrderStatus::Planned, 0);
        let started = act(&mut o, OrderAction::SetStatus(OrderStatus::InProgress)).await;
        assert_eq!(started.progress, 1);

        let mut partial = order(1200, 600, OrderStatus::Delayed, 50);
        let resumed = act(&mut partial, OrderAction::SetStatus(OrderStatus::InProgress)).await;
        assert_eq!(resumed.progress, 50);
        assert_eq!(resumed.quantity_produced, 600);
    }

    #[tokio::test]
    async fn production_at_or_above_plan_completes() {
        let mut o = order(2000, 450, OrderStatus::Delayed, 22);
        let done = act(&mut o, OrderAction::RecordProduction(2500)).await;
        assert_eq!(done.status, OrderStatus::Completed);
        assert_eq!(done.progress, 100);
        assert_eq!(done.quantity_produced, 2500);
    }

    #[tokio::test]
    async fn partial_production_starts_a_planned_order() {
        let mut o = order(1200, 0, OrderStatus::Planned, 0);
        let started = act(&mut o, OrderAction::RecordProduction(300)).await;
        assert_eq!(started.status, OrderStatus::InProgress);
        assert_eq!(started.progress, 25);
    }

    #[tokio::test]
    async fn partial_production_keeps_a_delayed_status() {
        let mut o = order(2000, 450, OrderStatus::Delayed, 22);
        let updated = act(&mut o, OrderAction::RecordProduction(1000)).await;
        assert_eq!(updated.status, OrderStatus::Delayed);
        assert_eq!(updated.progress, 50);
    }

    #[tokio::test]
    async fn negative_production_is_clamped_to_zero() {
        let mut o = order(1200, 100, OrderStatus::Planned, 8);
        let updated = act(&mut o, OrderAction::RecordProduction(-40)).await;
        assert_eq!(updated.quantity_produced, 0);
        assert_eq!(updated.progress, 0);
        assert_eq!(updated.status, OrderStatus::Planned);
    }

    #[tokio::test]
    async fn nothing_planned_counts_as_complete() {
        let mut o = order(0, 0, OrderStatus::Planned, 0);
        let updated = act(&mut o, OrderAction::RecordProduction(0)).await;
        assert_eq!(updated.progress, 100);
        assert_eq!(updated.status, OrderStatus::Completed);
    }

    #[tokio::test]
    async fn scheduling_replaces_machines_and_dates() {
        let mut o = order(1200, 0, OrderStatus::Planned, 0);
        o.assigned_machine_ids = vec!["M-01".into(), "M-03".into()];
        let start = NaiveDate::from_ymd_opt(2023, 11, 6).unwrap();
        let due = NaiveDate::from_ymd_opt(2023, 11, 9).unwrap();

        let scheduled = act(
            &mut o,
            OrderAction::Schedule {
                machine_id: "M-04".into(),
                start_date: start,
                due_date: due,
            },
        )
        .await;

        assert_eq!(scheduled.assigned_machine_ids, vec!["M-04".to_string()]);
        assert_eq!(scheduled.start_date, start);
        assert_eq!(scheduled.due_date, due);
    }

    #[test]
    fn progress_rounds_and_caps() {
        assert_eq!(progress_for(3250, 5000), 65);
        assert_eq!(progress_for(1, 3), 33);
        assert_eq!(progress_for(2, 3), 67);
        assert_eq!(progress_for(9000, 5000), 100);
    }
}
