//! Composition root: one configured gateway shared by every controller

use crate::dashboards::d400_overview::DashboardOverview;
use crate::domain::a003_reservation::calendar::load_calendar_events;
use crate::domain::a003_reservation::ui::details::view_model::ReservationFormController;
use crate::domain::a003_reservation::ui::list::state::ReservationList;
use crate::domain::a004_payment::ui::details::view_model::PaymentFormController;
use crate::shared::config::ClientConfig;
use crate::shared::gateway::{GatewayError, HttpGateway};
use contracts::domain::a003_reservation::{CalendarEvent, ReservationId};
use std::rc::Rc;

pub struct App {
    config: ClientConfig,
    gateway: Rc<HttpGateway>,
}

impl App {
    pub fn new(config: ClientConfig) -> Self {
        let gateway = Rc::new(HttpGateway::new(&config.api.base_path));
        Self { config, gateway }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn gateway(&self) -> Rc<HttpGateway> {
        Rc::clone(&self.gateway)
    }

    /// Shared so the debounced guest search can outlive the input handler
    pub fn reservation_form(&self) -> Rc<ReservationFormController<HttpGateway>> {
        Rc::new(ReservationFormController::new(
            self.gateway(),
            self.config.reservation.clone(),
        ))
    }

    pub fn reservation_list(&self) -> ReservationList<HttpGateway> {
        ReservationList::new(self.gateway())
    }

    pub fn payment_form(&self) -> PaymentFormController<HttpGateway> {
        PaymentFormController::new(self.gateway())
    }

    pub async fn load_dashboard(&self) -> DashboardOverview {
        DashboardOverview::load(self.gateway.as_ref(), &self.config.dashboard).await
    }

    pub async fn calendar_events(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Vec<CalendarEvent>, GatewayError> {
        load_calendar_events(self.gateway.as_ref(), start, end).await
    }

    /// Opened in a new tab by the view
    pub fn invoice_url(&self, reservation_id: ReservationId) -> String {
        self.gateway.invoice_url(reservation_id)
    }

    /// Size of the "recent check-ins" panel
    pub fn recent_checkins_limit(&self) -> usize {
        self.config.reservation.recent_checkins_limit
    }
}
