//! Reminder evaluation.

use chrono::{Days, NaiveDate};

use crate::model::PlanEvent;

/// Date on which the event's reminder becomes active, if it has one.
pub fn reminder_date(event: &PlanEvent) -> Option<NaiveDate> {
    let lead = event.reminder_setting.lead_days()?;
    Some(
        event
            .start_date
            .checked_sub_days(Days::new(lead))
            .unwrap_or(NaiveDate::MIN),
    )
}

/// An event's reminder is active once `today` reaches its reminder date,
/// until the user dismisses it.
pub fn is_reminder_active(event: &PlanEvent, today: NaiveDate) -> bool {
    if event.is_reminder_dismissed {
        return false;
    }
    reminder_date(event).is_some_and(|date| today >= date)
}

/// Events whose reminders are active on `today`, in list order.
pub fn active_reminders(events: &[PlanEvent], today: NaiveDate) -> Vec<&PlanEvent> {
    events
        .iter()
        .filter(|event| is_reminder_active(event, today))
        .collect()
}
