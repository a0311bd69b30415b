//! Sharing a `SyncSlotPool` between threads:
//!
//! * Views keep objects alive while other threads try to destroy them.
//! * Pool activity is visible via `tracing` events.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use handle_pool::SyncSlotPool;
use tracing_subscriber::filter::LevelFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_thread_names(true)
        .init();

    let pool = Arc::new(SyncSlotPool::<String, 4>::new());

    let handle = pool.create("configuration blob".to_string());

    let view = pool.get(handle).expect("just created");
    println!("Main thread holds a view of: {}", *view);

    let destroyer = thread::Builder::new()
        .name("destroyer".to_string())
        .spawn({
            let pool = Arc::clone(&pool);
            move || {
                println!("Destroyer waiting for the view to be released...");
                let destroyed = pool.destroy(handle);
                println!("Destroyer finished, destroyed: {destroyed}");
            }
        })
        .expect("failed to spawn thread");

    // The destroyer cannot make progress while we hold the view.
    thread::sleep(Duration::from_millis(200));
    println!("Main thread still reads: {}", *view);

    drop(view);
    destroyer.join().expect("destroyer thread panicked");

    println!("After destruction: {:?}", pool.get(handle).map(|v| v.len()));
}
