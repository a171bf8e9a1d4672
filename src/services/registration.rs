//! Registration engine
//!
//! The only subsystem with multi-record invariants. Booking creation and
//! deletion each run as one Postgres transaction: the booking row insert and
//! the guarded counter move commit together or not at all. Payment sits in
//! front as a two-phase protocol — `register` either books a free offering
//! directly or hands back a gateway order, and `confirm_payment` is the only
//! path that can materialize a booking for a paid offering, strictly after
//! signature verification.

use tracing::{debug, info, warn};

use crate::config::FeaturesConfig;
use crate::database::{DatabasePool, DatabaseService};
use crate::models::booking::{Booking, BookingReport, CreateBookingRequest, PaymentStatus};
use crate::models::payment::PaymentConfirmation;
use crate::models::sub_event::{SubEvent, SubEventDetail};
use crate::services::payment::{GatewayOrder, PaymentService};
use crate::utils::errors::{FestBuddyError, Result};

/// What `register` produced: either a finished booking (free offering) or a
/// gateway order the client must pay before calling `confirm_payment`
#[derive(Debug)]
pub enum RegistrationOutcome {
    Booked(Booking),
    PaymentRequired { order: GatewayOrder },
}

#[derive(Clone)]
pub struct RegistrationService {
    pool: DatabasePool,
    db: DatabaseService,
    payment: PaymentService,
    features: FeaturesConfig,
}

impl RegistrationService {
    pub fn new(
        pool: DatabasePool,
        db: DatabaseService,
        payment: PaymentService,
        features: FeaturesConfig,
    ) -> Self {
        Self {
            pool,
            db,
            payment,
            features,
        }
    }

    /// Entry point for a registration. Resolves the selected offering's fee:
    /// zero-fee offerings are booked immediately, paid offerings get a
    /// gateway order and no booking until `confirm_payment` succeeds.
    pub async fn register(&self, request: CreateBookingRequest) -> Result<RegistrationOutcome> {
        let with_details = self
            .db
            .sub_event_with_details(request.sub_event_id)
            .await?
            .ok_or(FestBuddyError::SubEventNotFound {
                sub_event_id: request.sub_event_id,
            })?;

        if !with_details.sub_event.registration_open() {
            return Err(FestBuddyError::RegistrationClosed {
                sub_event_id: with_details.sub_event.id,
            });
        }

        let detail = select_detail(
            &with_details.sub_event,
            &with_details.details,
            request.additional_info.as_deref(),
        )?;

        // Advisory read; the guarded UPDATE inside the transaction is the
        // authoritative check. This only spares the gateway an order that is
        // certain to be unbookable.
        if !detail.has_capacity() {
            return Err(FestBuddyError::CapacityFull {
                detail_id: detail.id,
            });
        }

        if detail.entry_fee == 0 {
            let status = if self.features.mark_free_bookings_paid {
                PaymentStatus::Paid
            } else {
                PaymentStatus::Pending
            };
            let booking = self.create_booking(&request, status).await?;
            return Ok(RegistrationOutcome::Booked(booking));
        }

        debug!(
            sub_event_id = request.sub_event_id,
            detail_id = detail.id,
            entry_fee = detail.entry_fee,
            "Offering is paid, creating gateway order"
        );
        let currency = self.payment.currency().to_string();
        let order = self.payment.create_order(detail.entry_fee, &currency).await?;

        Ok(RegistrationOutcome::PaymentRequired { order })
    }

    /// Second phase for paid offerings. The confirmation must name a recorded
    /// order, carry a matching signature, and the order must cover the fee of
    /// the offering being booked. Settling the order is a guarded Pending to
    /// Paid flip, so a replayed confirmation cannot book twice. A signature
    /// mismatch records the order as Failed and no booking ever exists.
    pub async fn confirm_payment(
        &self,
        request: CreateBookingRequest,
        confirmation: PaymentConfirmation,
    ) -> Result<Booking> {
        let order = self
            .payment
            .find_order(&confirmation.order_id)
            .await?
            .ok_or_else(|| FestBuddyError::PaymentOrderNotFound {
                order_id: confirmation.order_id.clone(),
            })?;

        let verified = self.payment.verify_signature(
            &confirmation.order_id,
            &confirmation.payment_id,
            &confirmation.signature,
        );

        if !verified {
            warn!(order_id = %confirmation.order_id, "Payment signature mismatch, refusing booking");
            // A settled order keeps its recorded outcome
            if order.status == PaymentStatus::Pending.as_str() {
                self.payment
                    .mark_order(
                        &confirmation.order_id,
                        PaymentStatus::Failed,
                        Some(&confirmation.payment_id),
                    )
                    .await?;
            }
            return Err(FestBuddyError::PaymentVerificationFailed {
                order_id: confirmation.order_id,
            });
        }

        let with_details = self
            .db
            .sub_event_with_details(request.sub_event_id)
            .await?
            .ok_or(FestBuddyError::SubEventNotFound {
                sub_event_id: request.sub_event_id,
            })?;
        let detail = select_detail(
            &with_details.sub_event,
            &with_details.details,
            request.additional_info.as_deref(),
        )?;

        // The order is left Pending here: the client may retry against the
        // offering the order was actually created for.
        if order.amount != detail.entry_fee * 100 {
            warn!(
                order_id = %confirmation.order_id,
                order_amount = order.amount,
                entry_fee = detail.entry_fee,
                "Order amount does not cover the offering fee, refusing booking"
            );
            return Err(FestBuddyError::PaymentVerificationFailed {
                order_id: confirmation.order_id,
            });
        }

        let settled = self
            .payment
            .settle_order(&confirmation.order_id, &confirmation.payment_id)
            .await?;
        if !settled {
            warn!(order_id = %confirmation.order_id, "Order already settled, refusing booking");
            return Err(FestBuddyError::PaymentOrderSettled {
                order_id: confirmation.order_id,
            });
        }

        let booking = match self.create_booking(&request, PaymentStatus::Paid).await {
            Ok(booking) => booking,
            Err(err) => {
                if let Err(mark_err) = self
                    .payment
                    .mark_order(
                        &confirmation.order_id,
                        PaymentStatus::Failed,
                        Some(&confirmation.payment_id),
                    )
                    .await
                {
                    warn!(
                        order_id = %confirmation.order_id,
                        error = %mark_err,
                        "Could not record the order failure"
                    );
                }
                return Err(err);
            }
        };

        info!(
            booking_id = booking.id,
            order_id = %confirmation.order_id,
            ticket_number = %booking.ticket_number,
            "Paid booking confirmed"
        );
        Ok(booking)
    }

    /// Create a booking. One transaction covers the slot claim on the
    /// selected offering and the booking insert; any failure inside rolls
    /// everything back.
    pub async fn create_booking(
        &self,
        request: &CreateBookingRequest,
        payment_status: PaymentStatus,
    ) -> Result<Booking> {
        let event =
            self.db
                .events
                .find_by_id(request.event_id)
                .await?
                .ok_or(FestBuddyError::EventNotFound {
                    event_id: request.event_id,
                })?;

        let user =
            self.db
                .users
                .find_by_id(request.user_id)
                .await?
                .ok_or(FestBuddyError::UserNotFound {
                    user_id: request.user_id,
                })?;

        let with_details = self
            .db
            .sub_event_with_details(request.sub_event_id)
            .await?
            .ok_or(FestBuddyError::SubEventNotFound {
                sub_event_id: request.sub_event_id,
            })?;

        if !with_details.sub_event.registration_open() {
            return Err(FestBuddyError::RegistrationClosed {
                sub_event_id: with_details.sub_event.id,
            });
        }

        let detail = select_detail(
            &with_details.sub_event,
            &with_details.details,
            request.additional_info.as_deref(),
        )?;

        let mut tx = self.pool.begin().await?;

        let claimed = self
            .db
            .sub_events
            .try_claim_detail_slot(&mut tx, detail.id)
            .await
            .map_err(as_transaction_failure)?;

        if !claimed {
            tx.rollback().await.map_err(|e| {
                FestBuddyError::TransactionFailed(e.to_string())
            })?;
            debug!(detail_id = detail.id, "Slot claim refused, offering full");
            return Err(FestBuddyError::CapacityFull {
                detail_id: detail.id,
            });
        }

        let booking = self
            .db
            .bookings
            .create_in_tx(&mut tx, request, payment_status, None)
            .await
            .map_err(as_transaction_failure)?;

        tx.commit()
            .await
            .map_err(|e| FestBuddyError::TransactionFailed(e.to_string()))?;

        info!(
            booking_id = booking.id,
            event_id = event.id,
            user_id = user.id,
            sub_event_id = with_details.sub_event.id,
            detail_id = detail.id,
            ticket_number = %booking.ticket_number,
            "Booking created"
        );
        Ok(booking)
    }

    /// Delete a booking, releasing the slot it held. The offering to
    /// decrement is re-derived exactly as at creation; a missing sub-event or
    /// offering skips the decrement but never blocks the deletion.
    pub async fn delete_booking(&self, booking_id: i64) -> Result<()> {
        let booking = self
            .db
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or(FestBuddyError::BookingNotFound { booking_id })?;

        let detail_id = match booking.sub_event_id {
            Some(sub_event_id) => match self.db.sub_event_with_details(sub_event_id).await? {
                Some(with_details) => {
                    let info = (!booking.additional_info.is_empty())
                        .then_some(booking.additional_info.as_str());
                    match select_detail(&with_details.sub_event, &with_details.details, info) {
                        Ok(detail) => Some(detail.id),
                        Err(_) => {
                            warn!(
                                booking_id = booking.id,
                                sub_event_id = sub_event_id,
                                "No matching offering for booking, skipping slot release"
                            );
                            None
                        }
                    }
                }
                None => None,
            },
            None => None,
        };

        let mut tx = self.pool.begin().await?;

        if let Some(detail_id) = detail_id {
            self.db
                .sub_events
                .release_detail_slot(&mut tx, detail_id)
                .await
                .map_err(as_transaction_failure)?;
        }

        self.db
            .bookings
            .delete_in_tx(&mut tx, booking.id)
            .await
            .map_err(as_transaction_failure)?;

        tx.commit()
            .await
            .map_err(|e| FestBuddyError::TransactionFailed(e.to_string()))?;

        info!(booking_id = booking.id, "Booking deleted");
        Ok(())
    }

    /// Booking by id, as a report row
    pub async fn booking_report(&self, booking_id: i64) -> Result<BookingReport> {
        self.db
            .bookings
            .report_by_id(booking_id)
            .await?
            .ok_or(FestBuddyError::BookingNotFound { booking_id })
    }

    /// All bookings joined with event/college/sub-event/user names
    pub async fn list_reports(&self) -> Result<Vec<BookingReport>> {
        self.db.bookings.list_reports().await
    }

    /// Everything a user has booked, as report rows
    pub async fn reports_for_user(&self, user_id: i64) -> Result<Vec<BookingReport>> {
        self.db
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(FestBuddyError::UserNotFound { user_id })?;

        self.db.bookings.reports_by_user(user_id).await
    }
}

/// Errors inside the atomic unit abort the whole operation; storage failures
/// surface as TransactionFailed, domain errors pass through unchanged.
fn as_transaction_failure(err: FestBuddyError) -> FestBuddyError {
    match err {
        FestBuddyError::Database(e) => FestBuddyError::TransactionFailed(e.to_string()),
        other => other,
    }
}

/// Resolve the offering a registration targets: Gaming sub-events match
/// `additional_info` against the game titles, everything else takes the
/// first (sole) offering.
pub(crate) fn select_detail<'a>(
    sub_event: &SubEvent,
    details: &'a [SubEventDetail],
    additional_info: Option<&str>,
) -> Result<&'a SubEventDetail> {
    if sub_event.is_gaming() {
        let title = additional_info.unwrap_or_default();
        details
            .iter()
            .find(|d| d.game_title.as_deref() == Some(title))
            .ok_or_else(|| FestBuddyError::GameNotFound {
                game_title: title.to_string(),
            })
    } else {
        details.first().ok_or(FestBuddyError::SubEventDetailsMissing {
            sub_event_id: sub_event.id,
        })
    }
}
