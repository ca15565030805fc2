//! Generator traffic read back through the reader over an in-memory bus

use candaq_core::{OutputMode, CAN_SFF_MASK};
use candaq_generator::Scheduler;
use candaq_reader::Reader;
use candaq_tests::LoopbackBus;
use candaq_transport::{IdFilter, Transport};

/// Run `cycles` generator cycles onto the bus
async fn generate(bus: &LoopbackBus, cycles: u64) {
    let mut scheduler = Scheduler::with_seed(42);
    let mut tx = bus.endpoint(Vec::new());
    tx.open().await.unwrap();
    for _ in 0..cycles {
        scheduler.step(&mut tx).await;
    }
}

/// Poll the reader until the bus is drained
async fn drain(bus: &LoopbackBus, reader: &mut Reader) -> Vec<String> {
    let mut lines = Vec::new();
    while bus.pending() > 0 {
        if let Some(line) = reader.poll().await.unwrap() {
            lines.push(line);
        }
    }
    lines
}

#[tokio::test]
async fn test_thirty_cycles_decoded() {
    let bus = LoopbackBus::new();
    generate(&bus, 30).await;
    assert_eq!(bus.pending(), 31);

    let mut reader = Reader::new(
        Box::new(bus.endpoint(Vec::new())),
        OutputMode::HumanReadable,
    );
    reader.open().await.unwrap();
    let lines = drain(&bus, &mut reader).await;

    let count = |prefix: &str| lines.iter().filter(|l| l.starts_with(prefix)).count();
    assert_eq!(count("[RX] [MOTOR] RPM: "), 15);
    assert_eq!(count("[RX] [INFO] Placa: ABC1234"), 10);
    assert_eq!(count("[RX] [ELETRICA] Fabricacao: 10/12/2024"), 6);

    // Cycle 30 is the last cycle: engine, identification, electrical
    let tail: Vec<&str> = lines[lines.len() - 3..].iter().map(|s| s.as_str()).collect();
    assert!(tail[0].starts_with("[RX] [MOTOR]"));
    assert_eq!(tail[1], "[RX] [INFO] Placa: ABC1234");
    assert_eq!(tail[2], "[RX] [ELETRICA] Fabricacao: 10/12/2024");
}

#[tokio::test]
async fn test_engine_fields_survive_the_bus() {
    let bus = LoopbackBus::new();
    generate(&bus, 20).await;

    let mut reader = Reader::new(
        Box::new(bus.endpoint(Vec::new())),
        OutputMode::HumanReadable,
    );
    reader.open().await.unwrap();

    for line in drain(&bus, &mut reader).await {
        let Some(rest) = line.strip_prefix("[RX] [MOTOR] RPM: ") else {
            continue;
        };
        // "<rpm> | Vel: <speed> km/h | Temp: <temp> C"
        let parts: Vec<&str> = rest.split(" | ").collect();
        let rpm: u16 = parts[0].parse().unwrap();
        let speed: u8 = parts[1]
            .trim_start_matches("Vel: ")
            .trim_end_matches(" km/h")
            .parse()
            .unwrap();
        let temp: u8 = parts[2]
            .trim_start_matches("Temp: ")
            .trim_end_matches(" C")
            .parse()
            .unwrap();
        assert!((800..=4500).contains(&rpm));
        assert!(speed <= 140);
        assert!((80..=105).contains(&temp));
    }
}

#[tokio::test]
async fn test_filtered_reader_sees_engine_only() {
    let bus = LoopbackBus::new();
    generate(&bus, 30).await;

    let filters = vec![IdFilter::new(0x123, CAN_SFF_MASK)];
    let mut reader = Reader::new(Box::new(bus.endpoint(filters)), OutputMode::Raw);
    reader.open().await.unwrap();
    let lines = drain(&bus, &mut reader).await;

    assert_eq!(lines.len(), 15);
    assert!(lines
        .iter()
        .all(|l| l.starts_with("[RX] ID: 0x123 | DLC: 8 | Data: ")));
}

#[tokio::test]
async fn test_raw_identification_line() {
    let bus = LoopbackBus::new();
    generate(&bus, 3).await;

    let filters = vec![IdFilter::new(0x700, CAN_SFF_MASK)];
    let mut reader = Reader::new(Box::new(bus.endpoint(filters)), OutputMode::Raw);
    reader.open().await.unwrap();

    assert_eq!(
        drain(&bus, &mut reader).await,
        vec!["[RX] ID: 0x700 | DLC: 7 | Data: 41 42 43 31 32 33 34 ".to_string()]
    );
}
