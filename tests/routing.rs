// Router properties: round-robin fairness and completion aggregation across
// the pool.

mod common;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use common::RecordingObserver;
use spindle::{
    spawn_router, spawn_worker, spawn_worker_with_observer, DispatchConfig, Message, SpinObserver,
};

#[tokio::test]
async fn work_is_routed_round_robin() {
    let config = DispatchConfig::default()
        .with_pool_size(4)
        .with_spin_delay(Duration::from_millis(1));
    let observer = Arc::new(RecordingObserver::default());
    let workers: Vec<_> = (0..config.pool_size)
        .map(|_| {
            spawn_worker_with_observer(&config, Some(observer.clone() as Arc<dyn SpinObserver>))
        })
        .collect();
    let router = spawn_router(workers.clone(), &config);

    let total: u64 = 10;
    for id in 0..total {
        router.send(Message::work(id)).await.unwrap();
    }
    let (complete, handle) = Message::complete();
    router.send(complete).await.unwrap();
    handle.wait_timeout(Duration::from_secs(10)).await.unwrap();

    let events = observer.events();
    assert_eq!(events.len(), total as usize);

    // Item j must land on child j mod k: all ids in one residue class share a
    // worker, and distinct classes map to distinct workers.
    let pool = config.pool_size as u64;
    let mut class_to_worker: HashMap<u64, String> = HashMap::new();
    for event in &events {
        let class = event.id % pool;
        let worker = class_to_worker
            .entry(class)
            .or_insert_with(|| event.worker.clone());
        assert_eq!(
            worker, &event.worker,
            "id {} left its residue class's worker",
            event.id
        );
    }
    let distinct: std::collections::HashSet<_> = class_to_worker.values().collect();
    assert_eq!(distinct.len(), config.pool_size);

    // 10 items over 4 workers: classes 0 and 1 get 3, classes 2 and 3 get 2.
    let mut counts: HashMap<u64, usize> = HashMap::new();
    for event in &events {
        *counts.entry(event.id % pool).or_default() += 1;
    }
    assert_eq!(counts[&0], 3);
    assert_eq!(counts[&1], 3);
    assert_eq!(counts[&2], 2);
    assert_eq!(counts[&3], 2);

    router.shutdown();
    for worker in &workers {
        worker.shutdown();
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn router_waits_for_its_slowest_child() {
    let fast = DispatchConfig::default().with_spin_delay(Duration::from_millis(1));
    let slow = DispatchConfig::default().with_spin_delay(Duration::from_millis(300));

    let mut workers: Vec<_> = (0..3).map(|_| spawn_worker(&fast)).collect();
    workers.push(spawn_worker(&slow));
    let router = spawn_router(workers.clone(), &fast);

    // One item per child; id 3 lands on the slow worker.
    for id in 0..4 {
        router.send(Message::work(id)).await.unwrap();
    }
    let (complete, handle) = Message::complete();
    router.send(complete).await.unwrap();

    // The fast children finish almost immediately, but the router must not
    // resolve while the slow child is still spinning on its item.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(
        !handle.is_resolved(),
        "router resolved before its slowest child finished"
    );

    handle.wait_timeout(Duration::from_secs(10)).await.unwrap();
    assert!(handle.is_resolved());

    router.shutdown();
    for worker in &workers {
        worker.shutdown();
    }
}

#[tokio::test]
async fn router_send_fails_after_shutdown() {
    let config = DispatchConfig::default().with_spin_delay(Duration::from_millis(1));
    let workers: Vec<_> = (0..2).map(|_| spawn_worker(&config)).collect();
    let router = spawn_router(workers.clone(), &config);

    router.shutdown();
    assert!(router.send(Message::work(0)).await.is_err());

    for worker in &workers {
        worker.shutdown();
    }
}
