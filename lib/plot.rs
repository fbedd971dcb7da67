use core::fmt::Write;
use heapless::String;

use crate::error::{Error, Result};
use crate::histogram::Histogram;

pub trait Plotter {
    type Error;

    fn clear(&mut self) -> core::result::Result<(), Self::Error>;
    fn title(&mut self, text: &str) -> core::result::Result<(), Self::Error>;
    /// Clears the plot area, `max_y` becomes the full bar height.
    fn set_scale(&mut self, max_y: u32) -> core::result::Result<(), Self::Error>;
    fn draw_bar(&mut self, height: u32) -> core::result::Result<(), Self::Error>;
    fn advance(&mut self) -> core::result::Result<(), Self::Error>;
    fn caption(&mut self, text: &str) -> core::result::Result<(), Self::Error>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct PlotGeometry {
    pub min_value: u16,
    pub max_value: u16,
    pub min_occurrences: u32,
    pub max_occurrences: u32,
    pub mode: u32,
    pub plot_width: u16,
    pub shift_right: u16,
}

impl PlotGeometry {
    /// `width` is the last addressable column. `None` for an empty histogram.
    pub fn new<const R: usize>(histogram: &Histogram<R>, width: u16) -> Option<Self> {
        let values = histogram.value_range()?;
        let (min_occurrences, max_occurrences) = histogram.occurrence_range()?;
        let plot_width = values.end() - values.start();
        let shift_right = shift_right(plot_width, width);
        Some(PlotGeometry {
            min_value: *values.start(),
            max_value: *values.end(),
            min_occurrences,
            max_occurrences,
            mode: histogram.mode(),
            plot_width,
            shift_right,
        })
    }
}

pub fn shift_right(plot_width: u16, width: u16) -> u16 {
    match width.checked_sub(plot_width) {
        Some(spare) => spare / 2,
        None => 0,
    }
}

pub fn render<P, const R: usize>(
    plotter: &mut P,
    histogram: &Histogram<R>,
    geometry: &PlotGeometry,
    title: &str,
    jitter: u32,
) -> Result<(), P::Error>
where
    P: Plotter,
{
    plotter.clear().map_err(Error::Sink)?;
    plotter.title(title).map_err(Error::Sink)?;
    plotter.set_scale(geometry.mode).map_err(Error::Sink)?;

    for _ in 0..geometry.shift_right {
        plotter.advance().map_err(Error::Sink)?;
    }
    for value in geometry.min_value..=geometry.max_value {
        plotter
            .draw_bar(histogram.occurrences(value))
            .map_err(Error::Sink)?;
        plotter.advance().map_err(Error::Sink)?;
    }

    let mut caption = String::<32>::new();
    write!(&mut caption, "Jitter: {} ticks", jitter).map_err(|_| Error::BufferWrite)?;
    plotter.caption(&caption).map_err(Error::Sink)?;
    Ok(())
}
