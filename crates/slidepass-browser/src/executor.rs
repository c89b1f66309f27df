use crate::error::Result;
use crate::pointer::PointerDevice;
use slidepass_solver::DragPlan;
use tracing::{debug, warn};

/// Replays a [`DragPlan`] on a pointer: hold, move through every step, pause, release.
pub struct DragExecutor<P> {
    pointer: P,
}

impl<P: PointerDevice> DragExecutor<P> {
    pub fn new(pointer: P) -> Self {
        Self { pointer }
    }

    pub fn pointer(&self) -> &P {
        &self.pointer
    }

    pub fn into_inner(self) -> P {
        self.pointer
    }

    /// Execute the plan. Each event is awaited before the next is issued.
    ///
    /// If a move fails the button is released before the error is returned,
    /// so the page is not left mid-drag.
    pub async fn execute(&mut self, plan: &DragPlan) -> Result<()> {
        debug!(
            distance = plan.distance,
            steps = plan.steps.len(),
            "starting drag"
        );

        self.pointer.press().await?;

        for (index, step) in plan.steps.iter().enumerate() {
            if let Err(err) = self
                .pointer
                .move_by(f64::from(step.dx), f64::from(step.dy))
                .await
            {
                warn!(index, error = %err, "pointer move failed, releasing");
                if let Err(release_err) = self.pointer.release().await {
                    warn!(error = %release_err, "release after failed move also failed");
                }
                return Err(err);
            }
        }

        tokio::time::sleep(plan.release_pause()).await;
        self.pointer.release().await?;

        debug!("drag finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BrowserError;
    use slidepass_core::GapOffset;
    use slidepass_solver::DragStep;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Press,
        Move(f64, f64),
        Release,
    }

    #[derive(Default)]
    struct RecordingPointer {
        events: Vec<Event>,
        fail_on_move: Option<usize>,
        moves: usize,
    }

    #[async_trait::async_trait]
    impl PointerDevice for RecordingPointer {
        async fn press(&mut self) -> Result<()> {
            self.events.push(Event::Press);
            Ok(())
        }

        async fn move_by(&mut self, dx: f64, dy: f64) -> Result<()> {
            if self.fail_on_move == Some(self.moves) {
                return Err(BrowserError::PointerError("target closed".to_string()));
            }
            self.moves += 1;
            self.events.push(Event::Move(dx, dy));
            Ok(())
        }

        async fn release(&mut self) -> Result<()> {
            self.events.push(Event::Release);
            Ok(())
        }
    }

    fn plan(steps: &[(i32, i32)]) -> DragPlan {
        DragPlan {
            offset: GapOffset::new(0),
            distance: steps.iter().map(|(dx, _)| dx).sum(),
            steps: steps
                .iter()
                .map(|&(dx, dy)| DragStep { dx, dy })
                .collect(),
            release_pause_ms: 0,
        }
    }

    #[tokio::test]
    async fn test_events_in_order() {
        let mut executor = DragExecutor::new(RecordingPointer::default());
        executor
            .execute(&plan(&[(3, 0), (7, 2), (-1, 4)]))
            .await
            .unwrap();

        assert_eq!(
            executor.into_inner().events,
            vec![
                Event::Press,
                Event::Move(3.0, 0.0),
                Event::Move(7.0, 2.0),
                Event::Move(-1.0, 4.0),
                Event::Release,
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_move_releases_button() {
        let pointer = RecordingPointer {
            fail_on_move: Some(1),
            ..RecordingPointer::default()
        };
        let mut executor = DragExecutor::new(pointer);

        let result = executor.execute(&plan(&[(5, 0), (5, 0), (5, 0)])).await;
        assert!(matches!(result, Err(BrowserError::PointerError(_))));
        assert_eq!(
            executor.pointer().events,
            vec![Event::Press, Event::Move(5.0, 0.0), Event::Release]
        );
    }

    #[tokio::test]
    async fn test_empty_plan_still_presses_and_releases() {
        let mut executor = DragExecutor::new(RecordingPointer::default());
        executor.execute(&plan(&[])).await.unwrap();
        assert_eq!(
            executor.into_inner().events,
            vec![Event::Press, Event::Release]
        );
    }
}
