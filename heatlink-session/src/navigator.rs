//! Screen navigation
//!
//! Every screen is visited with the same algorithm:
//!
//! 1. Prime the controller cursor with the screen's probe (once, or repeated
//!    under [`ReadinessStrategy::BoundedPoll`]). Skipping it makes the
//!    controller ignore the select.
//! 2. Send the select and decode the screen's fields from the reply.
//! 3. Fetch each follow-up page and decode its fields, still on the screen.
//! 4. Flush with a poll, send the return request and, when the controller
//!    asks for it, the confirmation. These replies are only logged.
//!
//! Absent fields leave the result map untouched. When bounded polling gives
//! up without the controller settling, the screen is still read, but decode
//! failures on it count as absent instead of aborting the session.

use crate::exchange::exchange;
use crate::frames::SETTLED_REPLY_LENGTH;
use crate::screen::{ReadinessStrategy, Screen, ScreenExit};
use heatlink_core::{extract_into, ExtractionMode, ResultMap, SessionResult};
use heatlink_transport::TransportLayer;

/// Result of waiting for the controller to settle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOutcome {
    /// Requests sent
    pub attempts: usize,
    /// Whether a settled reply was seen
    pub settled: bool,
}

/// Summary of one screen visit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitReport {
    pub screen: Screen,
    /// Fields written to the result map
    pub fields: usize,
    /// Whether the screen was read in strict mode
    pub settled: bool,
}

/// Walks controller screens over a borrowed transport
pub struct ScreenNavigator<'a, T: TransportLayer + ?Sized> {
    transport: &'a mut T,
    strategy: ReadinessStrategy,
}

impl<'a, T: TransportLayer + ?Sized> ScreenNavigator<'a, T> {
    pub fn new(transport: &'a mut T, strategy: ReadinessStrategy) -> Self {
        Self {
            transport,
            strategy,
        }
    }

    /// Enter `screen`, decode its fields into `results` and return to the
    /// main menu
    ///
    /// # Errors
    /// Any transport error or a strict-mode field decode error; both end the
    /// session
    pub async fn visit(&mut self, screen: Screen, results: &mut ResultMap) -> SessionResult<VisitReport> {
        let layout = screen.layout();
        let label = screen.as_str();

        let mut settled = true;
        if let Some(probe) = layout.probe {
            let outcome = self.settle(probe, label, "probe").await?;
            settled = outcome.settled;
        }
        let mode = if settled {
            ExtractionMode::Strict
        } else {
            log::warn!("Screen {} did not settle, reading it best-effort", label);
            ExtractionMode::BestEffort
        };

        let reply = exchange(&mut *self.transport, layout.select, &format!("{} select", label)).await?;
        let mut fields = extract_into(&reply, layout.fields, mode, results)?;

        for (index, page) in layout.pages.iter().enumerate() {
            let reply = exchange(
                &mut *self.transport,
                page.request,
                &format!("{} page {}", label, index + 1),
            )
            .await?;
            fields += extract_into(&reply, page.fields, mode, results)?;
        }

        if let Some(exit) = &layout.exit {
            self.leave(exit, label).await?;
        }

        log::debug!("Screen {} yielded {} fields", label, fields);
        Ok(VisitReport {
            screen,
            fields,
            settled,
        })
    }

    /// Send `payload` until the controller settles, as the strategy allows
    pub async fn settle(&mut self, payload: &[u8], label: &str, step: &str) -> SessionResult<PollOutcome> {
        let attempts = match self.strategy {
            ReadinessStrategy::IntermediateProbe => {
                exchange(&mut *self.transport, payload, &format!("{} {}", label, step)).await?;
                return Ok(PollOutcome {
                    attempts: 1,
                    settled: true,
                });
            }
            ReadinessStrategy::BoundedPoll { attempts } => attempts.max(1),
        };

        for attempt in 1..=attempts {
            let reply = exchange(
                &mut *self.transport,
                payload,
                &format!("{} {} #{}", label, step, attempt),
            )
            .await?;
            if reply.len() == SETTLED_REPLY_LENGTH {
                return Ok(PollOutcome {
                    attempts: attempt,
                    settled: true,
                });
            }
        }

        log::debug!("{} {}: no settled reply after {} attempts", label, step, attempts);
        Ok(PollOutcome {
            attempts,
            settled: false,
        })
    }

    async fn leave(&mut self, exit: &ScreenExit, label: &str) -> SessionResult<()> {
        self.settle(exit.flush, label, "flush").await?;

        let reply = exchange(&mut *self.transport, exit.back, &format!("{} return", label)).await?;
        if let Some(confirm) = &exit.confirm {
            if reply.len() == confirm.reply_length {
                exchange(&mut *self.transport, confirm.request, &format!("{} confirm", label)).await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::{self, NOOP_POLL, RETURN_TO_MAIN};
    use crate::tags;
    use crate::testing::{reply_of_length, screen_reply, ScriptedTransport};
    use heatlink_core::{FieldValue, SessionError};

    const NOT_SETTLED: usize = 20;

    fn payloads(transport: &ScriptedTransport) -> Vec<Vec<u8>> {
        transport.sent.iter().map(|s| s[5..].to_vec()).collect()
    }

    fn water_reply(text: &[u8]) -> Vec<u8> {
        screen_reply(0x11, &[(tags::WATER_TEMP, text)])
    }

    #[tokio::test]
    async fn test_water_visit_with_confirm() {
        let mut transport = ScriptedTransport::primed(vec![
            reply_of_length(0x10, NOT_SETTLED),
            water_reply(b"45,0\xb0\x43"),
            reply_of_length(0x12, 8),
            reply_of_length(0x13, frames::water::CONFIRM_REPLY_LENGTH),
            reply_of_length(0x14, 8),
        ]);
        let mut results = ResultMap::new();

        let report = ScreenNavigator::new(&mut transport, ReadinessStrategy::IntermediateProbe)
            .visit(Screen::Water, &mut results)
            .await
            .unwrap();

        assert_eq!(report.fields, 1);
        assert!(report.settled);
        assert_eq!(results.get("water-temp"), Some(&FieldValue::Decimal(45.0)));
        assert_eq!(
            payloads(&transport),
            vec![
                frames::water::PROBE.to_vec(),
                frames::water::SELECT.to_vec(),
                NOOP_POLL.to_vec(),
                frames::water::RETURN.to_vec(),
                frames::water::CONFIRM.to_vec(),
            ]
        );
        assert_eq!(transport.remaining(), 0);
    }

    #[tokio::test]
    async fn test_confirm_skipped_on_other_length() {
        let mut transport = ScriptedTransport::primed(vec![
            reply_of_length(0x10, NOT_SETTLED),
            water_reply(b"45,0\xb0\x43"),
            reply_of_length(0x12, 8),
            reply_of_length(0x13, 30),
        ]);
        let mut results = ResultMap::new();

        ScreenNavigator::new(&mut transport, ReadinessStrategy::IntermediateProbe)
            .visit(Screen::Water, &mut results)
            .await
            .unwrap();

        assert_eq!(transport.sent.len(), 4);
        assert_eq!(payloads(&transport)[3], frames::water::RETURN.to_vec());
    }

    #[tokio::test]
    async fn test_bounded_polling_stops_at_bound() {
        let mut replies = vec![reply_of_length(0x10, NOT_SETTLED); 4];
        replies.push(screen_reply(0x11, &[(tags::BUFFER_TOP_TEMP, &b"55,5\xb0\x43"[..])]));
        replies.extend(vec![reply_of_length(0x12, NOT_SETTLED); 4]);
        replies.push(reply_of_length(0x13, 10));
        let mut transport = ScriptedTransport::primed(replies);
        let mut results = ResultMap::new();

        let report = ScreenNavigator::new(&mut transport, ReadinessStrategy::bounded())
            .visit(Screen::Buffer, &mut results)
            .await
            .unwrap();

        assert!(!report.settled);
        assert_eq!(results.get("buffer-top-temp"), Some(&FieldValue::Decimal(55.5)));
        let sent = payloads(&transport);
        assert_eq!(sent.len(), 10);
        assert!(sent[..4].iter().all(|p| p[..] == frames::buffer::PROBE));
        assert_eq!(sent[4], frames::buffer::SELECT.to_vec());
        assert!(sent[5..9].iter().all(|p| p[..] == NOOP_POLL));
        assert_eq!(sent[9], RETURN_TO_MAIN.to_vec());
    }

    #[tokio::test]
    async fn test_bounded_polling_stops_when_settled() {
        let mut transport = ScriptedTransport::primed(vec![
            reply_of_length(0x10, NOT_SETTLED),
            reply_of_length(0x10, 8),
        ]);

        let outcome = ScreenNavigator::new(&mut transport, ReadinessStrategy::bounded())
            .settle(&NOOP_POLL, "water", "flush")
            .await
            .unwrap();

        assert_eq!(
            outcome,
            PollOutcome {
                attempts: 2,
                settled: true
            }
        );
        assert_eq!(transport.sent.len(), 2);
    }

    #[tokio::test]
    async fn test_unsettled_screen_is_read_best_effort() {
        let mut replies = vec![reply_of_length(0x10, NOT_SETTLED); 4];
        replies.push(water_reply(b"4?,0\xb0\x43"));
        replies.extend(vec![reply_of_length(0x12, 8)]);
        replies.push(reply_of_length(0x13, 10));
        let mut transport = ScriptedTransport::primed(replies);
        let mut results = ResultMap::new();

        let report = ScreenNavigator::new(&mut transport, ReadinessStrategy::bounded())
            .visit(Screen::Water, &mut results)
            .await
            .unwrap();

        assert_eq!(report.fields, 0);
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_number_is_fatal_when_settled() {
        let mut transport = ScriptedTransport::primed(vec![
            reply_of_length(0x10, NOT_SETTLED),
            water_reply(b"4?,0\xb0\x43"),
        ]);
        let mut results = ResultMap::new();

        let result = ScreenNavigator::new(&mut transport, ReadinessStrategy::IntermediateProbe)
            .visit(Screen::Water, &mut results)
            .await;

        assert!(matches!(result, Err(SessionError::FieldDecode { .. })));
    }

    #[tokio::test]
    async fn test_boiler_reads_counter_page() {
        let mut transport = ScriptedTransport::primed(vec![
            reply_of_length(0x10, NOT_SETTLED),
            screen_reply(0x11, &[(tags::BOILER_TEMP, &b"62,0\xb0\x43"[..])]),
            screen_reply(
                0x12,
                &[(tags::BOILER_RUNTIME, &b"12345 h"[..]), (tags::BOILER_STARTS, &b"678"[..])],
            ),
            reply_of_length(0x13, 8),
            reply_of_length(0x14, 10),
        ]);
        let mut results = ResultMap::new();

        let report = ScreenNavigator::new(&mut transport, ReadinessStrategy::IntermediateProbe)
            .visit(Screen::Boiler, &mut results)
            .await
            .unwrap();

        assert_eq!(report.fields, 3);
        assert_eq!(results.get("boiler-temp"), Some(&FieldValue::Decimal(62.0)));
        assert_eq!(results.get("boiler-runtime"), Some(&FieldValue::Integer(12345)));
        assert_eq!(results.get("boiler-starts"), Some(&FieldValue::Integer(678)));
        assert_eq!(payloads(&transport)[2], frames::boiler::COUNTERS_PAGE.to_vec());
        assert_eq!(payloads(&transport)[3], NOOP_POLL.to_vec());
    }

    #[tokio::test]
    async fn test_main_menu_has_no_exit() {
        let mut transport = ScriptedTransport::primed(vec![
            reply_of_length(0x10, NOT_SETTLED),
            screen_reply(0x11, &[(tags::OUTDOOR_TEMP, &b"-4,5\xb0\x43"[..])]),
        ]);
        let mut results = ResultMap::new();

        ScreenNavigator::new(&mut transport, ReadinessStrategy::IntermediateProbe)
            .visit(Screen::MainMenu, &mut results)
            .await
            .unwrap();

        assert_eq!(transport.sent.len(), 2);
        assert_eq!(results.get("outdoor-temp"), Some(&FieldValue::Decimal(-4.5)));
    }

    #[tokio::test]
    async fn test_absent_field_keeps_earlier_value() {
        let mut transport = ScriptedTransport::primed(vec![
            reply_of_length(0x10, NOT_SETTLED),
            screen_reply(0x11, &[]),
            reply_of_length(0x12, 8),
            reply_of_length(0x13, 10),
        ]);
        let mut results = ResultMap::new();
        results.insert("water-temp", FieldValue::Decimal(40.0));

        let report = ScreenNavigator::new(&mut transport, ReadinessStrategy::IntermediateProbe)
            .visit(Screen::Water, &mut results)
            .await
            .unwrap();

        assert_eq!(report.fields, 0);
        assert_eq!(results.get("water-temp"), Some(&FieldValue::Decimal(40.0)));
    }

    #[tokio::test]
    async fn test_silence_mid_screen_is_fatal() {
        let mut transport = ScriptedTransport::primed(vec![reply_of_length(0x10, NOT_SETTLED)]);
        let mut results = ResultMap::new();

        let result = ScreenNavigator::new(&mut transport, ReadinessStrategy::IntermediateProbe)
            .visit(Screen::Solar, &mut results)
            .await;

        assert!(matches!(result, Err(SessionError::Timeout)));
        assert_eq!(payloads(&transport)[1], frames::solar::SELECT.to_vec());
    }
}
