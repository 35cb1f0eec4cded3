//! Strictly sequential async iteration.

use std::future::Future;

/// Run `op` over `items` one at a time, in order, collecting the outputs.
///
/// Each future is awaited to completion before the next is created, so
/// at most one operation is ever in flight. This is not a fan-out.
pub async fn run_in_order<I, T, F, Fut>(items: I, mut op: F) -> Vec<T>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = T>,
{
    let items = items.into_iter();
    let mut outputs = Vec::with_capacity(items.size_hint().0);
    for item in items {
        outputs.push(op(item).await);
    }
    outputs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn preserves_order_and_never_overlaps() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        // Later items finish faster, so a parallel run would reorder.
        let outputs = run_in_order([30u64, 20, 10], |ms| {
            let in_flight = in_flight.clone();
            let max_seen = max_seen.clone();
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                max_seen.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(ms)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                ms
            }
        })
        .await;

        assert_eq!(outputs, [30, 20, 10]);
        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_input_yields_nothing() {
        let outputs: Vec<u8> = run_in_order(Vec::<u8>::new(), |x| async move { x }).await;
        assert!(outputs.is_empty());
    }
}
