//! AppService end-to-end cycles against mock adapters.

use ecowork::app::events::AppEvent;
use ecowork::app::ports::{DisplayRow, OutputChannel};
use ecowork::app::service::AppService;
use ecowork::config::{READ_INTERVAL_MS, SystemConfig, TOPIC_ALERT, TOPIC_STATUS, TOPIC_TELEMETRY};
use ecowork::decision::{ClimateMode, Decision};
use ecowork::error::SensorError;
use ecowork::link::LinkState;

use crate::mock_hw::{
    EventLog, ManualClock, MockBroker, MockDisplay, MockHardware, RawInputs, RecordingDelay,
};

struct Rig {
    hw: MockHardware,
    lcd: MockDisplay,
    broker: MockBroker,
    clock: ManualClock,
    log: EventLog,
}

impl Rig {
    fn new(inputs: impl IntoIterator<Item = RawInputs>) -> Self {
        Self {
            hw: MockHardware::scripted(inputs),
            lcd: MockDisplay::default(),
            broker: MockBroker::online(),
            clock: ManualClock::default(),
            log: EventLog::default(),
        }
    }

    fn cycle(&mut self, app: &mut AppService<RecordingDelay>) -> Decision {
        app.run_cycle(&mut self.hw, &mut self.lcd, &mut self.broker, &mut self.log)
    }

    fn tick_at(&mut self, app: &mut AppService<RecordingDelay>, ms: u64) -> bool {
        self.clock.set_ms(ms);
        app.tick(&mut self.hw, &mut self.lcd, &mut self.broker, &self.clock, &mut self.log)
    }
}

fn service() -> AppService<RecordingDelay> {
    AppService::new(&SystemConfig::default(), RecordingDelay::default())
}

#[test]
fn start_shows_splash() {
    let mut app = service();
    let mut rig = Rig::new([RawInputs::new(22.0, 50.0, 1800, Some(40))]);
    app.start(&mut rig.lcd, &mut rig.log);

    assert_eq!(rig.lcd.shown(DisplayRow::Top), Some("EcoWork Hub     "));
    assert_eq!(rig.lcd.shown(DisplayRow::Bottom), Some("Iniciando...    "));
    assert!(matches!(rig.log.events[0], AppEvent::Started));
}

#[test]
fn comfortable_dim_room_full_cycle() {
    let mut app = service();
    let mut rig = Rig::new([RawInputs::new(22.0, 50.0, 1800, Some(40))]);
    rig.cycle(&mut app);

    assert!(rig.hw.level(OutputChannel::OfficeLight));
    assert!(!rig.hw.level(OutputChannel::Cooling));
    assert!(rig.hw.level(OutputChannel::Eco));

    assert_eq!(rig.lcd.shown(DisplayRow::Top), Some("Luz baixa, Lmp ON"));
    assert_eq!(rig.lcd.shown(DisplayRow::Bottom), Some("Temp OK. Modo Eco"));

    let topics: Vec<_> = rig.broker.published.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(topics, vec![TOPIC_STATUS, TOPIC_ALERT, TOPIC_TELEMETRY]);
    assert_eq!(rig.broker.on_topic(TOPIC_STATUS), vec!["Presente"]);
    assert_eq!(rig.broker.on_topic(TOPIC_ALERT), vec!["Clima Confortavel. Modo Eco."]);
    assert_eq!(
        rig.broker.on_topic(TOPIC_TELEMETRY),
        vec![r#"{"temperatura":22.0,"umidade":50.0,"luminosidade":1800,"distancia":40}"#]
    );
}

#[test]
fn nan_temperature_is_fault_without_publication() {
    let mut app = service();
    let mut rig = Rig::new([RawInputs::new(f32::NAN, 50.0, 1000, Some(40))]);
    let decision = rig.cycle(&mut app);

    assert_eq!(decision, Decision::SensorFault);
    assert!(rig.broker.published.is_empty());
    assert!(rig.hw.calls.is_empty());
    assert_eq!(rig.lcd.shown(DisplayRow::Top), Some("Falha no Sensor "));
    assert_eq!(rig.lcd.shown(DisplayRow::Bottom), Some("Verificar DHT22 "));
    assert_eq!(
        rig.log.count(|e| matches!(e, AppEvent::SensorFault { cause: None })),
        1
    );
}

#[test]
fn failed_dht_read_reports_cause() {
    let mut app = service();
    let mut inputs = RawInputs::new(22.0, 50.0, 1000, Some(40));
    inputs.climate = Err(SensorError::Checksum);
    let mut rig = Rig::new([inputs]);
    rig.cycle(&mut app);

    assert_eq!(
        rig.log.count(|e| matches!(
            e,
            AppEvent::SensorFault { cause: Some(SensorError::Checksum) }
        )),
        1
    );
}

#[test]
fn fault_keeps_previous_outputs() {
    let mut app = service();
    let mut rig = Rig::new([
        RawInputs::new(30.0, 50.0, 1000, Some(40)),
        RawInputs::new(f32::NAN, f32::NAN, 1000, Some(40)),
    ]);
    rig.cycle(&mut app);
    assert!(rig.hw.level(OutputChannel::Cooling));
    let calls_before = rig.hw.calls.len();

    rig.cycle(&mut app);
    assert_eq!(rig.hw.calls.len(), calls_before);
    assert!(rig.hw.level(OutputChannel::Cooling));
}

#[test]
fn absence_overrides_hot_room() {
    let mut app = service();
    let mut rig = Rig::new([RawInputs::new(27.0, 50.0, 1000, Some(150))]);
    rig.cycle(&mut app);

    for ch in [OutputChannel::OfficeLight, OutputChannel::Cooling, OutputChannel::Eco] {
        assert!(!rig.hw.level(ch), "{ch:?} should be off");
    }
    assert_eq!(rig.lcd.shown(DisplayRow::Top), Some("Ninguem por perto"));
    assert_eq!(rig.lcd.shown(DisplayRow::Bottom), Some("Modo Standby    "));
    assert_eq!(rig.broker.on_topic(TOPIC_STATUS), vec!["Ausente"]);
    assert!(rig.broker.on_topic(TOPIC_ALERT).is_empty());
    assert_eq!(rig.broker.on_topic(TOPIC_TELEMETRY).len(), 1);
}

#[test]
fn unchanged_lines_are_not_rewritten() {
    let mut app = service();
    let mut rig = Rig::new([RawInputs::new(22.0, 50.0, 1800, Some(40))]);
    rig.cycle(&mut app);
    rig.cycle(&mut app);
    assert_eq!(rig.lcd.writes.len(), 2);

    let summaries: Vec<u8> = rig
        .log
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::CycleCompleted(c) => Some(c.rows_written),
            _ => None,
        })
        .collect();
    assert_eq!(summaries, vec![2, 0]);
}

#[test]
fn only_the_changed_row_is_rewritten() {
    let mut app = service();
    let mut rig = Rig::new([
        RawInputs::new(22.0, 50.0, 1800, Some(40)),
        RawInputs::new(30.0, 50.0, 1800, Some(40)),
    ]);
    rig.cycle(&mut app);
    rig.lcd.writes.clear();
    rig.cycle(&mut app);
    assert_eq!(
        rig.lcd.writes,
        vec![(DisplayRow::Bottom, "Calor. AC Ligado".to_string())]
    );
}

#[test]
fn failed_display_write_is_retried_next_cycle() {
    let mut app = service();
    let mut rig = Rig::new([RawInputs::new(22.0, 50.0, 1800, Some(40))]);
    rig.lcd.fail_next = 1;
    rig.cycle(&mut app);
    assert_eq!(rig.lcd.writes.len(), 1);
    assert_eq!(rig.lcd.shown(DisplayRow::Top), None);

    rig.cycle(&mut app);
    assert_eq!(rig.lcd.shown(DisplayRow::Top), Some("Luz baixa, Lmp ON"));
}

#[test]
fn cycles_fire_on_the_read_interval() {
    let mut app = service();
    let mut rig = Rig::new([RawInputs::new(22.0, 50.0, 1800, Some(40))]);

    assert!(!rig.tick_at(&mut app, 10));
    assert!(!rig.tick_at(&mut app, READ_INTERVAL_MS - 1));
    assert!(rig.tick_at(&mut app, READ_INTERVAL_MS));
    assert!(!rig.tick_at(&mut app, READ_INTERVAL_MS + 10));
    assert!(rig.tick_at(&mut app, 2 * READ_INTERVAL_MS));
    assert_eq!(app.cycle_count(), 2);
    assert_eq!(rig.broker.upkeep_calls, 5);
}

#[test]
fn tick_reconnects_before_cycling() {
    let mut app = service();
    let mut rig = Rig::new([RawInputs::new(22.0, 50.0, 1800, Some(40))]);
    rig.broker.connected = false;
    rig.broker.refuse_connects = 2;

    assert!(rig.tick_at(&mut app, READ_INTERVAL_MS));
    assert_eq!(rig.broker.connect_calls, 3);
    assert_eq!(app.link_state(), LinkState::Connected);
    assert_eq!(
        rig.log.count(|e| matches!(e, AppEvent::ReconnectFailed { .. })),
        2
    );
    assert_eq!(rig.broker.on_topic(TOPIC_STATUS), vec!["Presente"]);
}

#[test]
fn cycle_summary_carries_decision() {
    let mut app = service();
    let mut rig = Rig::new([RawInputs::new(19.0, 50.0, 1000, Some(40))]);
    rig.cycle(&mut app);

    let summary = rig
        .log
        .events
        .iter()
        .find_map(|e| match e {
            AppEvent::CycleCompleted(c) => Some(c.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(summary.cycle, 1);
    assert_eq!(summary.snapshot.distance_cm, Some(40));
    assert_eq!(summary.published, 4);
    match summary.decision {
        Decision::Actuate(o) => {
            assert_eq!(o.climate_mode, ClimateMode::Off);
            assert!(!o.white_led_on);
        }
        Decision::SensorFault => panic!("expected actuation"),
    }
}
