use embedded_graphics::mono_font::ascii::FONT_10X20;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use embedded_graphics::prelude::{Point, Primitive, Size};
use embedded_graphics::primitives::{
    PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment,
};
use embedded_graphics::text::{Baseline, Text};

use crate::hw::Lcd;
use crate::plot::Plotter;

/// Bar plot on the LCD, one bar per column of `Plot::COLUMN_WIDTH` pixels.
pub struct Display<LCD> {
    lcd: LCD,
    column: u16,
    scale: u32,
}

impl<LCD> Display<LCD>
where
    LCD: Lcd,
{
    /// Rightmost column a bar can be drawn in.
    pub const WIDTH: u16 = Plot::COLUMNS - 1;

    pub fn new(lcd: LCD) -> Result<Self, LCD::Error> {
        let mut display = Display {
            lcd,
            column: 0,
            scale: 0,
        };
        display.clear()?;
        Ok(display)
    }

    fn init_frame(&mut self) -> Result<(), LCD::Error> {
        let border = Rectangle::with_corners(Frame::TOP_LEFT, Frame::BOTTOM_RIGHT).into_styled(
            PrimitiveStyleBuilder::new()
                .stroke_width(Frame::BORDER_WIDTH as u32)
                .stroke_color(Color::FRAME_BORDER)
                .stroke_alignment(StrokeAlignment::Outside)
                .fill_color(Color::BACKGROUND)
                .build(),
        );
        self.lcd.draw(&border)?;
        Ok(())
    }

    fn draw_text(&mut self, text: &str, position: Point) -> Result<(), LCD::Error> {
        let text = Text::with_baseline(
            text,
            position,
            MonoTextStyle::new(&FONT_10X20, Color::TEXT),
            Baseline::Top,
        );
        self.lcd.draw(&text)?;
        Ok(())
    }

    fn map_height(&self, height: u32) -> u32 {
        if self.scale == 0 {
            return 0;
        }
        map(
            height.min(self.scale) as u64,
            0,
            self.scale as u64,
            0,
            Frame::HEIGHT as u64,
        ) as u32
    }
}

impl<LCD> Plotter for Display<LCD>
where
    LCD: Lcd,
{
    type Error = LCD::Error;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.lcd.clear(Color::BACKGROUND)?;
        self.init_frame()?;
        self.column = 0;
        Ok(())
    }

    fn title(&mut self, text: &str) -> Result<(), Self::Error> {
        self.draw_text(text, Label::TITLE_POSITION)
    }

    fn set_scale(&mut self, max_y: u32) -> Result<(), Self::Error> {
        let area = Rectangle::with_corners(Frame::TOP_LEFT, Frame::BOTTOM_RIGHT)
            .into_styled(PrimitiveStyle::with_fill(Color::BACKGROUND));
        self.lcd.draw(&area)?;
        self.scale = max_y;
        self.column = 0;
        Ok(())
    }

    fn draw_bar(&mut self, height: u32) -> Result<(), Self::Error> {
        let height = self.map_height(height);
        if height == 0 {
            return Ok(());
        }
        let x = Frame::TOP_LEFT.x + self.column as i32 * Plot::COLUMN_WIDTH;
        let y = Frame::BOTTOM_RIGHT.y + 1 - height as i32;
        let bar = Rectangle::new(Point::new(x, y), Size::new(Plot::COLUMN_WIDTH as u32, height))
            .into_styled(PrimitiveStyle::with_fill(Color::BAR));
        self.lcd.draw(&bar)?;
        Ok(())
    }

    fn advance(&mut self) -> Result<(), Self::Error> {
        self.column += 1;
        if self.column >= Plot::COLUMNS {
            self.column = 0;
        }
        Ok(())
    }

    fn caption(&mut self, text: &str) -> Result<(), Self::Error> {
        let area = Rectangle::new(
            Point::new(0, Label::CAPTION_AREA_TOP),
            Size::new(
                Dimension::WIDTH as u32,
                (Dimension::HEIGHT - Label::CAPTION_AREA_TOP) as u32,
            ),
        )
        .into_styled(PrimitiveStyle::with_fill(Color::BACKGROUND));
        self.lcd.draw(&area)?;
        self.draw_text(text, Label::CAPTION_POSITION)
    }
}

struct Dimension;

impl Dimension {
    const WIDTH: i32 = 480;
    const HEIGHT: i32 = 320;
}

pub(crate) struct Plot;

impl Plot {
    pub(crate) const COLUMNS: u16 = 128;
    const COLUMN_WIDTH: i32 = 3;
}

struct Offset;

impl Offset {
    const BOTTOM: i32 = 40;
    const TOP: i32 = 40;
}

struct Frame;

impl Frame {
    const BORDER_WIDTH: i32 = 2;

    const WIDTH: i32 = Plot::COLUMNS as i32 * Plot::COLUMN_WIDTH;
    const HEIGHT: i32 = Dimension::HEIGHT - Offset::TOP - Offset::BOTTOM;

    const TOP_LEFT: Point = Point::new((Dimension::WIDTH - Frame::WIDTH) / 2, Offset::TOP);
    const BOTTOM_RIGHT: Point = Point::new(
        Frame::TOP_LEFT.x + Frame::WIDTH - 1,
        Frame::TOP_LEFT.y + Frame::HEIGHT - 1,
    );
}

struct Label;

impl Label {
    const HEIGHT: i32 = 20;
    const TITLE_POSITION: Point =
        Point::new(Frame::TOP_LEFT.x, (Offset::TOP - Label::HEIGHT) / 2);
    const CAPTION_AREA_TOP: i32 = Frame::BOTTOM_RIGHT.y + 1 + Frame::BORDER_WIDTH;
    const CAPTION_POSITION: Point = Point::new(
        Frame::TOP_LEFT.x,
        Label::CAPTION_AREA_TOP + (Offset::BOTTOM - Frame::BORDER_WIDTH - Label::HEIGHT) / 2,
    );
}

struct Color;

impl Color {
    const BACKGROUND: Rgb565 = Rgb565::BLACK;
    const FRAME_BORDER: Rgb565 = Rgb565::WHITE;
    const BAR: Rgb565 = Rgb565::YELLOW;
    const TEXT: Rgb565 = Rgb565::RED;
}

fn map(to_map: u64, in_min: u64, in_max: u64, out_min: u64, out_max: u64) -> u64 {
    (to_map - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}
