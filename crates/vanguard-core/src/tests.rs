#[cfg(test)]
mod tests {
    use crate::commands::MissionCommand;
    use crate::enums::*;
    use crate::events::MissionEvent;
    use crate::state::MissionSnapshot;
    use crate::types::{MissionClock, MissionObservations, TimerEffect};

    /// Verify all enums round-trip through serde_json.
    #[test]
    fn test_objective_kind_serde() {
        let variants = vec![
            ObjectiveKind::EliminateTarget,
            ObjectiveKind::SecureArea,
            ObjectiveKind::HackTerminal,
            ObjectiveKind::ExtractVip,
            ObjectiveKind::DefendPosition,
            ObjectiveKind::DestroyObjective,
            ObjectiveKind::StealthComplete,
            ObjectiveKind::Timed,
            ObjectiveKind::Escort,
            ObjectiveKind::Reconnaissance,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: ObjectiveKind = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_mission_state_serde() {
        let variants = vec![
            MissionState::Preparing,
            MissionState::InProgress,
            MissionState::Evacuating,
            MissionState::Success,
            MissionState::Failure,
            MissionState::Aborted,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: MissionState = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_mission_state_terminal() {
        assert!(!MissionState::Preparing.is_terminal());
        assert!(!MissionState::InProgress.is_terminal());
        assert!(!MissionState::Evacuating.is_terminal());
        assert!(MissionState::Success.is_terminal());
        assert!(MissionState::Failure.is_terminal());
        assert!(MissionState::Aborted.is_terminal());
    }

    #[test]
    fn test_mission_result_serde() {
        let variants = vec![
            MissionResult::CompleteSuccess,
            MissionResult::PartialSuccess,
            MissionResult::Failure,
            MissionResult::SquadWipe,
            MissionResult::TimerExpired,
            MissionResult::ObjectiveFailed,
            MissionResult::StealthSuccess,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: MissionResult = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_timer_kind_serde() {
        let variants = vec![
            TimerKind::Primary,
            TimerKind::Secondary,
            TimerKind::Hidden,
            TimerKind::Escalation,
            TimerKind::Reinforcement,
            TimerKind::Extraction,
            TimerKind::Hacking,
            TimerKind::Defusal,
            TimerKind::Rescue,
            TimerKind::Evacuation,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: TimerKind = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_timer_priority_ordering() {
        // Critical sorts ahead of everything else on the timer rail.
        assert!(TimerPriority::Critical < TimerPriority::High);
        assert!(TimerPriority::High < TimerPriority::Medium);
        assert!(TimerPriority::Medium < TimerPriority::Low);
        assert!(TimerPriority::Low < TimerPriority::Optional);
    }

    #[test]
    fn test_effect_kind_serde() {
        let variants = vec![
            EffectKind::PressureLevel,
            EffectKind::TimeExtension,
            EffectKind::PressureRelief,
            EffectKind::MovementPenalty,
            EffectKind::AccuracyPenalty,
            EffectKind::DamageModifier,
            EffectKind::ReinforcementRate,
            EffectKind::IntelReward,
            EffectKind::ResourceReward,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: EffectKind = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    /// Verify MissionCommand round-trips through serde (tagged union).
    #[test]
    fn test_mission_command_serde() {
        let commands = vec![
            MissionCommand::StartMission,
            MissionCommand::AbortMission,
            MissionCommand::CompleteObjective {
                objective_id: "alpha".to_string(),
            },
            MissionCommand::FailObjective {
                objective_id: "bravo".to_string(),
            },
            MissionCommand::RecordProgress {
                objective_id: "charlie".to_string(),
                amount: 2,
            },
            MissionCommand::UnitLost {
                unit: "ramirez".to_string(),
            },
            MissionCommand::UnitEvacuated {
                unit: "chen".to_string(),
            },
            MissionCommand::TriggerEvacuation,
            MissionCommand::ApplyManipulation {
                manipulation_id: "hack_extend".to_string(),
            },
            MissionCommand::ActivateBonus {
                bonus_id: "overtime".to_string(),
            },
            MissionCommand::UpdateTriggerValue {
                trigger_id: "damage_taken".to_string(),
                value: 55,
            },
            MissionCommand::UpdateObservations {
                observations: MissionObservations {
                    stealth_breached: true,
                    ..Default::default()
                },
            },
            MissionCommand::GrantAbility {
                ability: "field_medic".to_string(),
            },
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: MissionCommand = serde_json::from_str(&json).unwrap();
            // Compare JSON representations since MissionCommand doesn't derive PartialEq
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }
    }

    /// Verify MissionEvent round-trips through serde.
    #[test]
    fn test_mission_event_serde() {
        let events = vec![
            MissionEvent::ObjectiveActivated {
                objective_id: "alpha".to_string(),
            },
            MissionEvent::TriggerActivated {
                trigger_id: "damage_taken".to_string(),
                affected_objectives: vec!["alpha".to_string(), "bravo".to_string()],
            },
            MissionEvent::TimerCritical {
                timer_id: "extraction".to_string(),
                remaining: 3,
            },
            MissionEvent::MissionEnded {
                result: MissionResult::SquadWipe,
            },
        ];
        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            let _back: MissionEvent = serde_json::from_str(&json).unwrap();
        }
    }

    /// Verify MissionSnapshot can be serialized to JSON.
    #[test]
    fn test_snapshot_serde() {
        let snapshot = MissionSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: MissionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.tick, back.tick);
        assert_eq!(snapshot.state, back.state);
        // Verify the default snapshot is reasonably small
        assert!(
            json.len() < 1024,
            "Empty snapshot should be <1KB, was {} bytes",
            json.len()
        );
    }

    #[test]
    fn test_timer_effect_serde() {
        let effect = TimerEffect {
            kind: EffectKind::TimeExtension,
            magnitude: 20,
        };
        let json = serde_json::to_string(&effect).unwrap();
        let back: TimerEffect = serde_json::from_str(&json).unwrap();
        assert_eq!(effect, back);
    }

    /// Verify MissionClock advancement.
    #[test]
    fn test_mission_clock_advance() {
        let mut clock = MissionClock::default();
        assert_eq!(clock.tick, 0);

        for _ in 0..30 {
            clock.advance();
        }
        assert_eq!(clock.tick, 30);
    }
}
