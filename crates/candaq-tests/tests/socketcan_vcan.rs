//! SocketCAN round trip on a virtual CAN interface
//!
//! Requires `vcan0` to be up. Run with:
//! `cargo test -p candaq-tests --test socketcan_vcan -- --ignored --test-threads=1`
#![cfg(target_os = "linux")]

use std::time::Duration;

use candaq_core::{decode, Frame};
use candaq_generator::Scheduler;
use candaq_transport::{SocketCanTransport, SystemConfig, Transport};

fn config(filters: Vec<u32>) -> SystemConfig {
    SystemConfig {
        interface: "vcan0".to_string(),
        driver: "socketcan".to_string(),
        filters,
        ..Default::default()
    }
}

/// Receive until `count` frames arrived or the bus goes quiet
async fn collect(rx: &mut SocketCanTransport, count: usize) -> Vec<Frame> {
    let mut frames = Vec::new();
    let mut idle = 0;
    while frames.len() < count && idle < 3 {
        match rx.receive().await.unwrap() {
            Some(frame) => frames.push(frame),
            None => idle += 1,
        }
    }
    frames
}

#[tokio::test]
#[ignore = "requires vcan0"]
async fn test_kernel_filter_admits_configured_id_only() {
    let mut rx = SocketCanTransport::new(&config(vec![0x123]))
        .with_read_timeout(Duration::from_millis(200));
    rx.open().await.unwrap();

    let mut tx = SocketCanTransport::new(&config(Vec::new()));
    tx.open().await.unwrap();

    let mut scheduler = Scheduler::with_seed(11);
    for _ in 0..30 {
        scheduler.step(&mut tx).await;
    }

    let frames = collect(&mut rx, 31).await;
    assert_eq!(frames.len(), 15);
    assert!(frames.iter().all(|f| f.id == 0x123 && f.length == 8));

    rx.close();
    tx.close();
}

#[tokio::test]
#[ignore = "requires vcan0"]
async fn test_unfiltered_round_trip() {
    let mut rx = SocketCanTransport::new(&config(Vec::new()))
        .with_read_timeout(Duration::from_millis(200));
    rx.open().await.unwrap();

    let mut tx = SocketCanTransport::new(&config(Vec::new()));
    tx.open().await.unwrap();

    let sent = Frame::new(0x456, &[0x07, 0xE8, 12, 10]);
    tx.send(&sent).await.unwrap();

    let frames = collect(&mut rx, 1).await;
    assert_eq!(frames, vec![sent]);
    assert_eq!(decode(&frames[0]), "[ELETRICA] Fabricacao: 10/12/2024");
}
