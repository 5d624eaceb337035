use std::sync::Arc;
use std::time::{Duration, Instant};

use ridepool::config::EngineConfig;
use ridepool::engine::Engine;
use ridepool::model::{ClockTime, NewRide, VehicleKind};

fn percentile(sorted: &[Duration], p: f64) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let idx = ((sorted.len() as f64) * p / 100.0) as usize;
    sorted[idx.min(sorted.len() - 1)]
}

fn print_latency(label: &str, latencies: &mut [Duration]) {
    if latencies.is_empty() {
        println!("  {label}: no samples");
        return;
    }
    latencies.sort();
    let total: Duration = latencies.iter().sum();
    let avg = total / latencies.len() as u32;
    println!("  {label}:");
    println!(
        "    n={}, avg={:.3}ms, p50={:.3}ms, p95={:.3}ms, p99={:.3}ms, max={:.3}ms",
        latencies.len(),
        avg.as_secs_f64() * 1000.0,
        percentile(latencies, 50.0).as_secs_f64() * 1000.0,
        percentile(latencies, 95.0).as_secs_f64() * 1000.0,
        percentile(latencies, 99.0).as_secs_f64() * 1000.0,
        latencies.last().map_or(0.0, |d| d.as_secs_f64() * 1000.0),
    );
}

/// Spread departures across the day so availability windows hold a realistic mix.
fn departure(i: usize) -> ClockTime {
    let minutes = (i * 7) % (24 * 60);
    ClockTime::new((minutes / 60) as u8, (minutes % 60) as u8).expect("minutes within a day")
}

fn new_car(poster: String, tag: String, at: ClockTime) -> NewRide {
    NewRide {
        poster_id: poster,
        vehicle_kind: VehicleKind::FourWheeler,
        vehicle_tag: tag,
        capacity: 7,
        departure: at,
        pickup_point: "HQ".into(),
        destination: "Station".into(),
    }
}

async fn phase1_sequential_publish(engine: &Engine, n: usize) {
    let mut latencies = Vec::with_capacity(n);
    let start = Instant::now();
    for i in 0..n {
        let t = Instant::now();
        engine
            .publish_ride(new_car(format!("P{i}"), format!("SEQ-{i}"), departure(i)))
            .await
            .expect("publish");
        latencies.push(t.elapsed());
    }
    let elapsed = start.elapsed();
    println!(
        "  {n} rides in {:.2}s = {:.0} ops/sec",
        elapsed.as_secs_f64(),
        n as f64 / elapsed.as_secs_f64()
    );
    print_latency("publish latency", &mut latencies);
}

async fn phase2_concurrent_booking(engine: Arc<Engine>) {
    let n_tasks = 32;
    let n_per_task = 200;
    let rides = engine.snapshot().await;

    let start = Instant::now();
    let mut handles = Vec::new();
    for task in 0..n_tasks {
        let engine = engine.clone();
        let ids: Vec<_> = rides.iter().map(|r| r.id).collect();
        handles.push(tokio::spawn(async move {
            let mut accepted = 0usize;
            for j in 0..n_per_task {
                let ride_id = ids[(task * 31 + j) % ids.len()];
                if engine.book_seat(&format!("B{task}-{j}"), ride_id).await.is_ok() {
                    accepted += 1;
                }
            }
            accepted
        }));
    }

    let mut accepted = 0;
    for h in handles {
        accepted += h.await.expect("booking task");
    }
    let elapsed = start.elapsed();
    let total = n_tasks * n_per_task;
    println!(
        "  {n_tasks} tasks x {n_per_task} bookings = {total} attempts ({accepted} accepted) in {:.2}s = {:.0} ops/sec",
        elapsed.as_secs_f64(),
        total as f64 / elapsed.as_secs_f64()
    );
}

async fn phase3_read_under_load(engine: Arc<Engine>, offset: usize) {
    let writer = {
        let engine = engine.clone();
        tokio::spawn(async move {
            for i in 0..2000 {
                let _ = engine
                    .publish_ride(new_car(
                        format!("W{i}"),
                        format!("LOAD-{i}"),
                        departure(offset + i),
                    ))
                    .await;
            }
        })
    };

    let mut latencies = Vec::with_capacity(2000);
    for i in 0..2000 {
        let t = Instant::now();
        let _ = engine.query_available(departure(i), None).await;
        latencies.push(t.elapsed());
    }
    writer.await.expect("writer task");
    print_latency("query_available latency", &mut latencies);
}

#[tokio::main]
async fn main() {
    let engine = Arc::new(Engine::new(EngineConfig::default()));

    println!("=== ridepool contention benchmark ===\n");

    println!("[phase 1] sequential publish throughput");
    phase1_sequential_publish(&engine, 2000).await;

    println!("\n[phase 2] concurrent booking throughput");
    phase2_concurrent_booking(engine.clone()).await;

    println!("\n[phase 3] read latency under write load");
    phase3_read_under_load(engine.clone(), 2000).await;

    println!("\n=== benchmark complete ===");
}
