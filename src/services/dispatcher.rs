use crate::error::Result;
use crate::models::{Alert, Candle, Direction, display_symbol};
use crate::services::evaluator::Hit;
use crate::services::notifier::{AlertNotification, Notifier};
use crate::store::AlertStore;

const COLOR_TOUCH: u32 = 0x3498DB; // blue
const COLOR_UP: u32 = 0x00FF00;
const COLOR_DOWN: u32 = 0xFF0000;

/// Decides whether an alert is consumed after a delivery attempt.
pub trait RetirePolicy: Send + Sync {
    fn should_retire(&self, delivered: bool) -> bool;
}

/// At-most-once semantics ("fire-and-forget-then-retire"): the alert is
/// consumed after its first delivery attempt even when delivery fails, so a
/// transient chat outage never produces duplicate notifications.
pub struct FireAndForget;

impl RetirePolicy for FireAndForget {
    fn should_retire(&self, _delivered: bool) -> bool {
        true
    }
}

/// Ordered fallback chain, first non-empty wins:
/// alert override, then the announcement-channel setting, then the
/// caller-supplied fallback for the current cycle.
pub fn resolve_destination<'a>(
    alert: &'a Alert,
    default_destination: Option<&'a str>,
    cycle_fallback: Option<&'a str>,
) -> Option<&'a str> {
    [
        alert.destination_override.as_deref(),
        default_destination,
        cycle_fallback,
    ]
    .into_iter()
    .flatten()
    .find(|dest| !dest.trim().is_empty())
}

pub fn build_notification(alert: &Alert, hit: &Hit, candle: &Candle) -> AlertNotification {
    let (price_field, price_display, color) = match alert.direction {
        Direction::Touch => (
            "Candle Range",
            format!("${:.2} - ${:.2}", candle.low, candle.high),
            COLOR_TOUCH,
        ),
        Direction::Up => ("Candle High", format!("${:.2}", hit.trigger_price), COLOR_UP),
        Direction::Down => ("Candle Low", format!("${:.2}", hit.trigger_price), COLOR_DOWN),
    };

    AlertNotification {
        title: format!("{} Price Alert", display_symbol(&alert.symbol)),
        direction_label: alert.direction.label(),
        strike_price: alert.strike_price,
        price_field,
        price_display,
        note: (!alert.note.is_empty()).then(|| alert.note.clone()),
        candle_time: candle.close_time_display(),
        color,
    }
}

/// Deliver one hit and retire the alert according to the policy.
///
/// Delivery failures are logged, never retried and never propagated; only a
/// store failure bubbles up, to be caught at the cycle level.
pub async fn dispatch_hit<N: Notifier>(
    store: &AlertStore,
    notifier: &N,
    policy: &dyn RetirePolicy,
    alert: &Alert,
    hit: &Hit,
    candle: &Candle,
    default_destination: Option<&str>,
    cycle_fallback: Option<&str>,
) -> Result<()> {
    let payload = build_notification(alert, hit, candle);

    let delivered = match resolve_destination(alert, default_destination, cycle_fallback) {
        Some(destination) => match notifier.deliver(destination, &payload).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("failed to deliver alert #{}: {}", alert.id, e);
                false
            }
        },
        None => {
            tracing::warn!("no destination resolvable for alert #{}", alert.id);
            false
        }
    };

    if policy.should_retire(delivered) {
        store.remove(alert.id)?;
        tracing::info!(
            "alert #{} hit and removed for {} {} {}",
            alert.id,
            alert.symbol,
            alert.direction.as_str(),
            alert.strike_price
        );
    }

    Ok(())
}
