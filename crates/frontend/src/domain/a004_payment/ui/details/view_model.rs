use crate::shared::date_utils::format_datetime;
use crate::shared::gateway::{Gateway, GatewayError};
use crate::shared::notice::Notice;
use crate::shared::state::{SavingFlag, WidgetState};
use contracts::domain::a003_reservation::ReservationId;
use contracts::domain::a004_payment::{validate_payment_amount, Payment, PaymentError, PaymentRequest};
use contracts::shared::money::{format_money, round2};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    Recorded { remaining: f64, fully_paid: bool },
    /// Payment stored, but the new balance could not be read back
    RecordedBalanceUnknown,
    Blocked(PaymentError),
    Ignored,
    Failed(GatewayError),
}

/// One history table row, already formatted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRow {
    pub paid_at: String,
    pub amount: String,
    pub method: String,
    pub note: String,
}

impl From<&Payment> for PaymentRow {
    fn from(p: &Payment) -> Self {
        let text = |v: &Option<String>| {
            v.as_deref()
                .filter(|s| !s.is_empty())
                .unwrap_or("-")
                .to_string()
        };
        Self {
            paid_at: p
                .paid_date
                .as_deref()
                .map(format_datetime)
                .unwrap_or_else(|| "-".to_string()),
            amount: format_money(p.paid_amount),
            method: text(&p.method),
            note: text(&p.note),
        }
    }
}

#[derive(Debug, Default)]
struct PaymentFormState {
    reservation_id: Option<ReservationId>,
    remaining: WidgetState<f64>,
    history: WidgetState<Vec<Payment>>,
    notice: Option<Notice>,
}

/// "Add payment" dialog for one reservation
pub struct PaymentFormController<G: Gateway> {
    gateway: Rc<G>,
    state: RefCell<PaymentFormState>,
    saving: SavingFlag,
}

impl<G: Gateway> PaymentFormController<G> {
    pub fn new(gateway: Rc<G>) -> Self {
        Self {
            gateway,
            state: RefCell::new(PaymentFormState::default()),
            saving: SavingFlag::default(),
        }
    }

    /// Open for `reservation_id`: balance and history load side by side
    pub async fn open(&self, reservation_id: ReservationId) {
        *self.state.borrow_mut() = PaymentFormState {
            reservation_id: Some(reservation_id),
            ..PaymentFormState::default()
        };
        futures::join!(self.refresh_remaining(), self.load_history());
    }

    /// Re-read the reservation and recompute what is still owed
    pub async fn refresh_remaining(&self) {
        let Some(id) = self.reservation_id() else {
            return;
        };
        let result = self.gateway.fetch_reservation(id).await;
        let mut s = self.state.borrow_mut();
        if s.reservation_id != Some(id) {
            return;
        }
        s.remaining = match result {
            Ok(reservation) => WidgetState::Loaded(reservation.remaining_balance()),
            Err(e) => {
                log::error!("failed to load reservation {}: {}", id, e);
                s.notice = Some(Notice::danger(e.to_string()));
                WidgetState::CannotLoad(e.to_string())
            }
        };
    }

    pub async fn load_history(&self) {
        let Some(id) = self.reservation_id() else {
            return;
        };
        let result = self.gateway.fetch_payment_history(id).await;
        let mut s = self.state.borrow_mut();
        if s.reservation_id == Some(id) {
            s.history = WidgetState::from_result(result);
        }
    }

    /// Validate and record a payment.
    ///
    /// On success the balance and history are re-read from the server.
    pub async fn submit(&self, amount_input: &str, method: &str, note: &str) -> PaymentOutcome {
        if self.saving.is_saving() {
            return PaymentOutcome::Ignored;
        }
        let reservation_id = self.reservation_id();
        let amount = amount_input.trim().parse::<f64>().unwrap_or(f64::NAN);
        let remaining = self.remaining();

        if let Err(e) = validate_payment_amount(reservation_id, amount, remaining) {
            self.set_notice(match e {
                PaymentError::ExceedsRemaining { .. } => Notice::warning(e.to_string()),
                _ => Notice::danger(e.to_string()),
            });
            return PaymentOutcome::Blocked(e);
        }
        let (Some(reservation_id), Some(_guard)) = (reservation_id, self.saving.try_begin()) else {
            return PaymentOutcome::Ignored;
        };

        let request = PaymentRequest {
            reservation_id,
            amount: round2(amount),
            method: method.trim().to_string(),
            note: note.trim().to_string(),
        };
        let receipt = match self.gateway.record_payment(&request).await {
            Ok(receipt) => receipt,
            Err(e) => {
                log::error!("payment for reservation {} failed: {}", reservation_id, e);
                self.set_notice(Notice::danger(e.to_string()));
                return PaymentOutcome::Failed(e);
            }
        };
        log::info!(
            "payment of {} recorded for reservation {}",
            format_money(request.amount),
            reservation_id
        );

        futures::join!(self.refresh_remaining(), self.load_history());
        let Some(remaining) = self.remaining().or(receipt.remaining) else {
            log::warn!("balance of reservation {} unknown after payment", reservation_id);
            return PaymentOutcome::RecordedBalanceUnknown;
        };
        let fully_paid = remaining <= 0.0;
        self.set_notice(Notice::success(if fully_paid {
            "Reservation fully paid."
        } else {
            "Payment added successfully."
        }));
        PaymentOutcome::Recorded {
            remaining,
            fully_paid,
        }
    }

    pub fn reservation_id(&self) -> Option<ReservationId> {
        self.state.borrow().reservation_id
    }

    /// Balance, once loaded
    pub fn remaining(&self) -> Option<f64> {
        self.state.borrow().remaining.loaded().copied()
    }

    /// Pre-filled amount: the full balance, or `0.00`
    pub fn suggested_amount(&self) -> String {
        format!("{:.2}", self.remaining().unwrap_or_default().max(0.0))
    }

    pub fn history(&self) -> WidgetState<Vec<PaymentRow>> {
        self.state
            .borrow()
            .history
            .clone()
            .map(|payments| payments.iter().map(PaymentRow::from).collect())
    }

    pub fn notice(&self) -> Option<Notice> {
        self.state.borrow().notice.clone()
    }

    fn set_notice(&self, notice: Notice) {
        self.state.borrow_mut().notice = Some(notice);
    }

    pub fn is_saving(&self) -> bool {
        self.saving.is_saving()
    }
}
