use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::Drawable;

#[cfg(target_os = "none")]
mod adc;
#[cfg(target_os = "none")]
mod helper;
#[cfg(target_os = "none")]
mod lcd;
#[cfg(target_os = "none")]
mod timers;

#[cfg(target_os = "none")]
pub use adc::{AdcConfig, Oversampling};
#[cfg(target_os = "none")]
pub use helper::*;
#[cfg(target_os = "none")]
pub use lcd::IliError;
#[cfg(target_os = "none")]
pub use timers::{FreeRunningClock, TickTimer};

pub trait Lcd {
    type Error;
    fn clear(&mut self, color: Rgb565) -> Result<(), Self::Error>;
    fn draw<D>(&mut self, drawable: &D) -> Result<D::Output, Self::Error>
    where
        D: Drawable<Color = Rgb565>;
}
