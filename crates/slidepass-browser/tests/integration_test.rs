use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::SeedableRng;
use slidepass_browser::{
    BrowserError, BrowserSession, CdpPointer, DragExecutor, PointerDevice, RetryPolicy,
};
use slidepass_core::{AppConfig, BrowserConfig};
use slidepass_solver::SlideSolver;
use std::time::Duration;

/// Pointer that tracks where a real cursor would end up.
#[derive(Default)]
struct TrackingPointer {
    x: f64,
    y: f64,
    pressed: bool,
    moves_while_pressed: usize,
}

#[async_trait::async_trait]
impl PointerDevice for TrackingPointer {
    async fn press(&mut self) -> slidepass_browser::Result<()> {
        if self.pressed {
            return Err(BrowserError::PointerState("pressed"));
        }
        self.pressed = true;
        Ok(())
    }

    async fn move_by(&mut self, dx: f64, dy: f64) -> slidepass_browser::Result<()> {
        if self.pressed {
            self.moves_while_pressed += 1;
        }
        self.x += dx;
        self.y += dy;
        Ok(())
    }

    async fn release(&mut self) -> slidepass_browser::Result<()> {
        if !self.pressed {
            return Err(BrowserError::PointerState("released"));
        }
        self.pressed = false;
        Ok(())
    }
}

fn puzzle(gap_column: u32) -> (RgbImage, RgbImage) {
    let reference = RgbImage::from_fn(260, 160, |x, y| Rgb([(x % 250) as u8, (y % 250) as u8, 90]));
    let mut gapped = reference.clone();
    for x in gap_column..gap_column + 40 {
        for y in 50..90 {
            gapped.put_pixel(x, y, Rgb([255, 255, 255]));
        }
    }
    (reference, gapped)
}

#[tokio::test]
async fn test_solved_plan_moves_pointer_to_gap() {
    let mut config = AppConfig::default();
    config.drag.release_pause_max_ms = 0;
    let solver = SlideSolver::from_config(&config).expect("build solver");

    let (reference, gapped) = puzzle(140);
    let plan = solver
        .solve(&reference, &gapped, &mut StdRng::seed_from_u64(17))
        .expect("solve");

    let mut executor = DragExecutor::new(TrackingPointer::default());
    executor.execute(&plan).await.expect("execute drag");

    let pointer = executor.into_inner();
    assert!(!pointer.pressed);
    assert!((pointer.x - 132.0).abs() < f64::EPSILON);
    assert!(pointer.y >= 0.0 && pointer.y <= 4.0 * plan.steps.len() as f64);
    assert_eq!(pointer.moves_while_pressed, plan.steps.len());
}

#[tokio::test]
async fn test_retry_resolves_until_plan_is_accepted() {
    let mut config = AppConfig::default();
    config.drag.release_pause_max_ms = 0;
    let solver = SlideSolver::from_config(&config).expect("build solver");
    let (reference, gapped) = puzzle(60);
    let policy = RetryPolicy {
        max_attempts: 3,
        delay: Duration::ZERO,
    };

    let plan = policy
        .run(|attempt| {
            let solver = solver.clone();
            let (reference, gapped) = (reference.clone(), gapped.clone());
            async move {
                let plan = solver
                    .solve(&reference, &gapped, &mut StdRng::seed_from_u64(u64::from(attempt)))
                    .map_err(|e| e.to_string())?;
                let mut executor = DragExecutor::new(TrackingPointer::default());
                executor.execute(&plan).await.map_err(|e| e.to_string())?;
                // Stand-in for the page's verdict: reject the first try.
                if attempt == 1 {
                    Err("slider rejected".to_string())
                } else {
                    Ok(plan)
                }
            }
        })
        .await
        .expect("second attempt accepted");

    assert_eq!(plan.distance, 52);
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_session_lifecycle() {
    let session = BrowserSession::open(&BrowserConfig::default())
        .await
        .expect("open session");
    assert!(!session.fingerprint().user_agent.is_empty());
    session.close().await.expect("close session");
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_drag_on_range_input() {
    let session = BrowserSession::open(&BrowserConfig::default())
        .await
        .expect("open session");
    let page = session
        .new_page("data:text/html,<input id='slider' type='range' min='0' max='300' value='0' style='width:300px'>")
        .await
        .expect("open page");

    let mut pointer = CdpPointer::on_element(page, "#slider").await.expect("find slider");
    let start = pointer.position();
    pointer.press().await.expect("press");
    pointer.move_by(50.0, 1.0).await.expect("move");
    pointer.release().await.expect("release");
    assert!((pointer.position().0 - start.0 - 50.0).abs() < f64::EPSILON);

    session.close().await.expect("close session");
}
