//! Timing tests for the throttle queues, run on a paused clock.

use folio_error::ThrottleError;
use folio_rate_limit::ThrottleQueueManager;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;

fn spawn_requests(
    manager: &ThrottleQueueManager,
    ceiling: u32,
    count: usize,
    done: &Arc<AtomicUsize>,
) -> Vec<JoinHandle<Result<(), ThrottleError>>> {
    (0..count)
        .map(|_| {
            let done = done.clone();
            tokio::spawn(manager.execute(ceiling, move || async move {
                done.fetch_add(1, Ordering::SeqCst);
                Ok::<_, ThrottleError>(())
            }))
        })
        .collect()
}

async fn sleep_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[tokio::test(start_paused = true)]
async fn test_ceiling_ten_admits_ten_per_window() -> anyhow::Result<()> {
    let manager = ThrottleQueueManager::default();
    let done = Arc::new(AtomicUsize::new(0));
    let handles = spawn_requests(&manager, 10, 25, &done);

    sleep_ms(999).await;
    assert_eq!(done.load(Ordering::SeqCst), 10);
    sleep_ms(1000).await;
    assert_eq!(done.load(Ordering::SeqCst), 20);
    sleep_ms(1000).await;
    assert_eq!(done.load(Ordering::SeqCst), 25);

    for handle in handles {
        handle.await??;
    }
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_ceiling_six_admits_six_per_window() {
    let manager = ThrottleQueueManager::default();
    let done = Arc::new(AtomicUsize::new(0));
    let _handles = spawn_requests(&manager, 6, 18, &done);

    sleep_ms(999).await;
    assert_eq!(done.load(Ordering::SeqCst), 6);
    sleep_ms(1000).await;
    assert_eq!(done.load(Ordering::SeqCst), 12);
    sleep_ms(1000).await;
    assert_eq!(done.load(Ordering::SeqCst), 18);
}

#[tokio::test(start_paused = true)]
async fn test_tiers_do_not_block_each_other() {
    let manager = ThrottleQueueManager::default();
    let slow = Arc::new(AtomicUsize::new(0));
    let fast = Arc::new(AtomicUsize::new(0));

    // Slow requests are queued first so the fast tier has to overtake them.
    let _slow = spawn_requests(&manager, 6, 12, &slow);
    let _fast = spawn_requests(&manager, 50, 100, &fast);
    assert_eq!(manager.queue_count(), 2);

    sleep_ms(999).await;
    assert_eq!(slow.load(Ordering::SeqCst), 6);
    assert_eq!(fast.load(Ordering::SeqCst), 50);
    sleep_ms(1000).await;
    assert_eq!(slow.load(Ordering::SeqCst), 12);
    assert_eq!(fast.load(Ordering::SeqCst), 100);
}

#[tokio::test(start_paused = true)]
async fn test_admission_is_first_in_first_out() -> anyhow::Result<()> {
    let manager = ThrottleQueueManager::default();
    let order = Arc::new(std::sync::Mutex::new(Vec::new()));

    let handles: Vec<_> = (0..9)
        .map(|i| {
            let order = order.clone();
            tokio::spawn(manager.execute(3, move || async move {
                order.lock().unwrap().push(i);
                Ok::<_, ThrottleError>(())
            }))
        })
        .collect();
    for handle in handles {
        handle.await??;
    }

    assert_eq!(*order.lock().unwrap(), (0..9).collect::<Vec<_>>());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_queue_is_created_before_first_poll() {
    let manager = ThrottleQueueManager::default();
    let pending = manager.execute(15, || async { Ok::<_, ThrottleError>(()) });
    assert_eq!(manager.queue_count(), 1);
    assert!(manager.has_queue(15));
    drop(pending);

    let _again = manager.execute(15, || async { Ok::<_, ThrottleError>(()) });
    let _other = manager.execute(100, || async { Ok::<_, ThrottleError>(()) });
    assert_eq!(manager.ceilings(), vec![15, 100]);
}

#[tokio::test(start_paused = true)]
async fn test_abort_all_rejects_pending_and_resets() {
    let manager = ThrottleQueueManager::default();
    let done = Arc::new(AtomicUsize::new(0));
    let handles = spawn_requests(&manager, 5, 15, &done);

    sleep_ms(900).await;
    assert_eq!(done.load(Ordering::SeqCst), 5);

    manager.abort_all();
    assert_eq!(manager.queue_count(), 0);

    let mut rejected = 0;
    for handle in handles {
        if handle.await.unwrap().is_err() {
            rejected += 1;
        }
    }
    assert_eq!(rejected, 10);
    assert_eq!(done.load(Ordering::SeqCst), 5);

    let fresh = manager.execute(5, || async { Ok::<_, ThrottleError>(()) });
    assert_eq!(manager.queue_count(), 1);
    assert!(fresh.await.is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_custom_interval() {
    let manager = ThrottleQueueManager::new(Duration::from_millis(200));
    let done = Arc::new(AtomicUsize::new(0));
    let _handles = spawn_requests(&manager, 2, 6, &done);

    sleep_ms(199).await;
    assert_eq!(done.load(Ordering::SeqCst), 2);
    sleep_ms(200).await;
    assert_eq!(done.load(Ordering::SeqCst), 4);
    sleep_ms(200).await;
    assert_eq!(done.load(Ordering::SeqCst), 6);
}

#[tokio::test(start_paused = true)]
async fn test_admissions_are_spread_across_the_window() {
    let manager = ThrottleQueueManager::default();
    let done = Arc::new(AtomicUsize::new(0));
    let _handles = spawn_requests(&manager, 4, 8, &done);

    sleep_ms(1).await;
    assert_eq!(done.load(Ordering::SeqCst), 1);
    sleep_ms(300).await;
    assert_eq!(done.load(Ordering::SeqCst), 2);
    sleep_ms(500).await;
    assert_eq!(done.load(Ordering::SeqCst), 4);
    sleep_ms(1000).await;
    assert_eq!(done.load(Ordering::SeqCst), 8);
}

#[tokio::test(start_paused = true)]
async fn test_oversized_ceiling_is_clamped() -> anyhow::Result<()> {
    let manager = ThrottleQueueManager::default();
    manager
        .execute(u32::MAX, || async { Ok::<_, ThrottleError>(()) })
        .await?;

    assert_eq!(manager.ceilings(), vec![1000]);
    assert!(manager.has_queue(u32::MAX));
    assert_eq!(manager.queue(0).ceiling(), 1);
    Ok(())
}
