use crate::error::{BrowserError, Result};
use chromiumoxide::cdp::browser_protocol::input::{
    DispatchMouseEventParams, DispatchMouseEventType, MouseButton,
};
use chromiumoxide::Page;
use tracing::debug;

/// Low-level pointer used to replay a drag.
///
/// Implementations must apply calls in the order they are made; a drag is
/// press, any number of moves, release.
#[async_trait::async_trait]
pub trait PointerDevice: Send {
    /// Press the primary button at the current position
    async fn press(&mut self) -> Result<()>;

    /// Move relative to the current position
    async fn move_by(&mut self, dx: f64, dy: f64) -> Result<()>;

    /// Release the primary button at the current position
    async fn release(&mut self) -> Result<()>;
}

/// Pointer that dispatches CDP mouse events into a Chromium page.
pub struct CdpPointer {
    page: Page,
    x: f64,
    y: f64,
    pressed: bool,
}

impl CdpPointer {
    /// Start at an absolute viewport position.
    pub fn new(page: Page, x: f64, y: f64) -> Self {
        Self {
            page,
            x,
            y,
            pressed: false,
        }
    }

    /// Start on the clickable point of the element matching `selector`, e.g. the slider handle.
    pub async fn on_element(page: Page, selector: &str) -> Result<Self> {
        let element = page
            .find_element(selector)
            .await
            .map_err(|_| BrowserError::SelectorNotFound(selector.to_string()))?;
        let point = element
            .clickable_point()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        debug!(selector, x = point.x, y = point.y, "pointer anchored on element");
        Ok(Self::new(page, point.x, point.y))
    }

    /// Current viewport position.
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    async fn dispatch(&self, kind: DispatchMouseEventType) -> Result<()> {
        let mut builder = DispatchMouseEventParams::builder()
            .r#type(kind.clone())
            .x(self.x)
            .y(self.y);

        builder = match kind {
            DispatchMouseEventType::MouseMoved if !self.pressed => builder.button(MouseButton::None),
            DispatchMouseEventType::MouseMoved => builder.button(MouseButton::Left).buttons(1),
            _ => builder.button(MouseButton::Left).click_count(1),
        };

        let params = builder.build().map_err(BrowserError::PointerError)?;
        self.page
            .execute(params)
            .await
            .map_err(|e| BrowserError::PointerError(e.to_string()))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl PointerDevice for CdpPointer {
    async fn press(&mut self) -> Result<()> {
        if self.pressed {
            return Err(BrowserError::PointerState("pressed"));
        }
        self.dispatch(DispatchMouseEventType::MousePressed).await?;
        self.pressed = true;
        Ok(())
    }

    async fn move_by(&mut self, dx: f64, dy: f64) -> Result<()> {
        self.x += dx;
        self.y += dy;
        self.dispatch(DispatchMouseEventType::MouseMoved).await
    }

    async fn release(&mut self) -> Result<()> {
        if !self.pressed {
            return Err(BrowserError::PointerState("released"));
        }
        self.dispatch(DispatchMouseEventType::MouseReleased).await?;
        self.pressed = false;
        Ok(())
    }
}
