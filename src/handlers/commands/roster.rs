//! Roster commands: /me, /sub, /out, /count and /who

use crate::handlers::BotContext;
use crate::models::{AttendanceChange, Event, IncomingMessage, ReduceOutcome, WithdrawOutcome};
use crate::services::OutgoingMessage;
use crate::utils::errors::Result;
use crate::utils::helpers::{parse_count, plural};

/// Guest count given as a command argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestCount {
    Unspecified,
    Count(u32),
    Invalid,
}

/// Parse `N`, `+N` or `-N` (with `sign` as the optional prefix)
pub fn parse_guest_count(args: &str, sign: char) -> GuestCount {
    let args = args.trim();
    let args = args.strip_prefix(sign).unwrap_or(args).trim();
    if args.is_empty() {
        return GuestCount::Unspecified;
    }
    match parse_count(args) {
        Some(n) => GuestCount::Count(n),
        None => GuestCount::Invalid,
    }
}

pub async fn handle_me(ctx: &BotContext, message: &IncomingMessage, event: &mut Event, args: &str) -> Result<()> {
    let from = message.sender.display_name();
    let attendee = message.sender.id;

    let text = match parse_guest_count(args, '+') {
        GuestCount::Invalid => pardon(&from),
        GuestCount::Unspecified => {
            event.record_attendance(attendee, 0);
            ctx.services.event_service.save_attendance(event, attendee).await?;
            format!("Awesome {}, we'll see you there", from)
        }
        GuestCount::Count(extra) => {
            let change = event.record_attendance(attendee, extra);
            ctx.services.event_service.save_attendance(event, attendee).await?;
            guests_recorded(&from, extra, change)
        }
    };

    reply(ctx, message, text).await
}

pub async fn handle_sub(ctx: &BotContext, message: &IncomingMessage, event: &mut Event, args: &str) -> Result<()> {
    let from = message.sender.display_name();
    let attendee = message.sender.id;

    let text = match parse_guest_count(args, '-') {
        GuestCount::Invalid | GuestCount::Unspecified => pardon(&from),
        GuestCount::Count(reduce_by) => match event.reduce_attendance(attendee, reduce_by) {
            ReduceOutcome::NotAttending => format!("But {}, you're not even coming!", from),
            ReduceOutcome::Reduced { seats } => {
                ctx.services.event_service.save_attendance(event, attendee).await?;
                guests_reduced(&from, seats)
            }
        },
    };

    reply(ctx, message, text).await
}

pub async fn handle_out(ctx: &BotContext, message: &IncomingMessage, event: &mut Event) -> Result<()> {
    let from = message.sender.display_name();
    let attendee = message.sender.id;

    let text = match event.withdraw(attendee) {
        WithdrawOutcome::Withdrawn { .. } => {
            ctx.services.event_service.save_attendance(event, attendee).await?;
            format!("Ok {}, sorry you can't make it", from)
        }
        WithdrawOutcome::NotAttending => format!("But {}, you weren't actually listed as coming!", from),
    };

    reply(ctx, message, text).await
}

pub async fn handle_count(ctx: &BotContext, message: &IncomingMessage, event: &Event) -> Result<()> {
    let text = attendance_summary(&message.sender.display_name(), event.total_attendance());
    reply(ctx, message, text).await
}

pub async fn handle_who(ctx: &BotContext, message: &IncomingMessage, event: &Event) -> Result<()> {
    let from = message.sender.display_name();

    let mut attendees = Vec::with_capacity(event.roster.len());
    for (&attendee, &seats) in &event.roster {
        let name = if attendee == message.sender.id {
            message.sender.display_name()
        } else {
            ctx.services.user_service.get_user_or_placeholder(attendee).await.display_name()
        };
        attendees.push(Attendee {
            is_sender: attendee == message.sender.id,
            name,
            seats,
        });
    }

    reply(ctx, message, who_is_coming(&from, &attendees)).await
}

/// One roster line for /who
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attendee {
    pub is_sender: bool,
    pub name: String,
    pub seats: u32,
}

pub fn who_is_coming(from: &str, attendees: &[Attendee]) -> String {
    match attendees {
        [] => format!("Hey {}, no-one has signed up yet", from),
        [only] => {
            let who = if only.is_sender { "you" } else { only.name.as_str() };
            format!("Hey {}, it looks like it's just {}{}", from, who, extras_suffix(only.seats))
        }
        _ => {
            let lines = attendees
                .iter()
                .map(|a| format!("   {}{}", a.name, extras_suffix(a.seats)))
                .collect::<Vec<_>>()
                .join("\n");
            format!("Hey {}, the following people are coming\n{}", from, lines)
        }
    }
}

pub fn attendance_summary(from: &str, total: u32) -> String {
    if total == 0 {
        return format!("Hey {}, no-one has signed up yet", from);
    }
    format!(
        "Hey {}, there {} {} wonderful {} coming bowling",
        from,
        plural(total, "is", "are"),
        total,
        plural(total, "person", "people")
    )
}

fn guests_recorded(from: &str, extra: u32, change: AttendanceChange) -> String {
    match change {
        AttendanceChange::Replaced { previous } if previous > 1 => format!(
            "Ok {}, I have recorded that you're bringing {} {}",
            from,
            extra,
            plural(extra, "person", "people")
        ),
        AttendanceChange::Replaced { .. } => format!("Excellent {}, the more the merrier!", from),
        AttendanceChange::New => format!(
            "Brilliant {}, we look forward to seeing you and your {} {}",
            from,
            extra,
            plural(extra, "extra", "extras")
        ),
    }
}

fn guests_reduced(from: &str, seats: u32) -> String {
    if seats > 1 {
        let guests = seats - 1;
        format!(
            "Ok {}, I have recorded that you're only bringing {} {}",
            from,
            guests,
            plural(guests, "person", "people")
        )
    } else {
        format!("Ok {}, so it's just you.", from)
    }
}

fn extras_suffix(seats: u32) -> String {
    if seats > 1 {
        let extra = seats - 1;
        format!(" and {} extra{}", extra, plural(extra, "", "s"))
    } else {
        String::new()
    }
}

fn pardon(from: &str) -> String {
    format!("I beg your pardon {}, I'm not sure how to deal with that.", from)
}

async fn reply(ctx: &BotContext, message: &IncomingMessage, text: String) -> Result<()> {
    ctx.send(OutgoingMessage::new(message.chat_id, text).silent()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attendee(name: &str, seats: u32, is_sender: bool) -> Attendee {
        Attendee {
            is_sender,
            name: name.to_string(),
            seats,
        }
    }

    #[test]
    fn test_parse_guest_count() {
        assert_eq!(parse_guest_count("", '+'), GuestCount::Unspecified);
        assert_eq!(parse_guest_count("+", '+'), GuestCount::Unspecified);
        assert_eq!(parse_guest_count("+2", '+'), GuestCount::Count(2));
        assert_eq!(parse_guest_count(" + 3 ", '+'), GuestCount::Count(3));
        assert_eq!(parse_guest_count("2", '+'), GuestCount::Count(2));
        assert_eq!(parse_guest_count("-1", '-'), GuestCount::Count(1));
        assert_eq!(parse_guest_count("+0", '+'), GuestCount::Invalid);
        assert_eq!(parse_guest_count("-1", '+'), GuestCount::Invalid);
        assert_eq!(parse_guest_count("lots", '+'), GuestCount::Invalid);
        assert_eq!(parse_guest_count("+4294967295", '+'), GuestCount::Invalid);
        assert_eq!(parse_guest_count("-101", '-'), GuestCount::Invalid);
    }

    #[test]
    fn test_guests_recorded_wording() {
        assert_eq!(
            guests_recorded("ada", 1, AttendanceChange::New),
            "Brilliant ada, we look forward to seeing you and your 1 extra"
        );
        assert_eq!(
            guests_recorded("ada", 2, AttendanceChange::Replaced { previous: 1 }),
            "Excellent ada, the more the merrier!"
        );
        assert_eq!(
            guests_recorded("ada", 1, AttendanceChange::Replaced { previous: 3 }),
            "Ok ada, I have recorded that you're bringing 1 person"
        );
    }

    #[test]
    fn test_guests_reduced_wording() {
        assert_eq!(guests_reduced("ada", 3), "Ok ada, I have recorded that you're only bringing 2 people");
        assert_eq!(guests_reduced("ada", 1), "Ok ada, so it's just you.");
    }

    #[test]
    fn test_attendance_summary() {
        assert_eq!(attendance_summary("ada", 0), "Hey ada, no-one has signed up yet");
        assert_eq!(attendance_summary("ada", 1), "Hey ada, there is 1 wonderful person coming bowling");
        assert_eq!(attendance_summary("ada", 4), "Hey ada, there are 4 wonderful people coming bowling");
    }

    #[test]
    fn test_who_is_coming() {
        assert_eq!(who_is_coming("ada", &[]), "Hey ada, no-one has signed up yet");
        assert_eq!(
            who_is_coming("ada", &[attendee("ada", 2, true)]),
            "Hey ada, it looks like it's just you and 1 extra"
        );
        assert_eq!(
            who_is_coming("ada", &[attendee("grace", 1, false)]),
            "Hey ada, it looks like it's just grace"
        );
        assert_eq!(
            who_is_coming("ada", &[attendee("ada", 1, true), attendee("grace", 3, false)]),
            "Hey ada, the following people are coming\n   ada\n   grace and 2 extras"
        );
    }
}
