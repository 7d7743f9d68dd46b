//! Console preview for the pixelmap engine
//!
//! Drives a small simulated pixel map with synthetic time and a mock
//! DMA transmitter, rendering the 8-bit tile as ANSI color blocks and
//! the 16-bit status cells as numbers.

use std::fmt::Write as _;
use std::io::{self, Write as _};
use std::time::{Duration as StdDuration, Instant as StdInstant};

use pixelmap_engine::{
    AnimationDef, AnimationModifiers, BufferSet, CellView, DEFAULT_TICK_RATE, FrameSync, Instant,
    PixelBuffer, PixelElement, PixelEngine, TickScheduler, Transmitter,
};

/// Channels in the simulated 8-bit tile (8 rgb pixels)
const TILE_CHANNELS: usize = 24;

/// Cells in the simulated 16-bit status bank
const STATUS_CELLS: usize = 4;

/// Ticks the mock DMA stays busy after a transfer starts
const DMA_BUSY_TICKS: u8 = 1;

/// How long the demo runs (8 seconds at the default rate)
const DEMO_TICKS: u32 = 8 * DEFAULT_TICK_RATE;

/// Shared frame hand-off between the engine and the mock DMA
static SYNC: FrameSync = FrameSync::new();

/// Pixel map: 8 rgb pixels on the tile, 4 mono16 status cells behind it
static ELEMENTS: [PixelElement; 12] = [
    PixelElement::rgb(0, 1, 2),
    PixelElement::rgb(3, 4, 5),
    PixelElement::rgb(6, 7, 8),
    PixelElement::rgb(9, 10, 11),
    PixelElement::rgb(12, 13, 14),
    PixelElement::rgb(15, 16, 17),
    PixelElement::rgb(18, 19, 20),
    PixelElement::rgb(21, 22, 23),
    PixelElement::mono16(24),
    PixelElement::mono16(25),
    PixelElement::mono16(26),
    PixelElement::mono16(27),
];

// Frame tables, hand-encoded: pixel (u16 le) | change | run | payload
static BACKDROP_FRAME: [u8; 7] = [0, 0, 0, 8, 96, 54, 8];
static BACKDROP_FRAMES: [&[u8]; 1] = [&BACKDROP_FRAME];
static BREATHE_UP_FRAME: [u8; 7] = [0, 0, 3, 8, 10, 6, 2];
static BREATHE_DOWN_FRAME: [u8; 7] = [0, 0, 4, 8, 10, 6, 2];
static BREATHE_FRAMES: [&[u8]; 6] = [
    &BREATHE_UP_FRAME,
    &BREATHE_UP_FRAME,
    &BREATHE_UP_FRAME,
    &BREATHE_DOWN_FRAME,
    &BREATHE_DOWN_FRAME,
    &BREATHE_DOWN_FRAME,
];
static TICKER_FRAME: [u8; 6] = [8, 0, 1, 4, 1, 0];
static TICKER_FRAMES: [&[u8]; 1] = [&TICKER_FRAME];
static WASH_FRAME_0: [u8; 7] = [0, 0, 0, 4, 8, 40, 120];
static WASH_FRAME_1: [u8; 7] = [4, 0, 0, 4, 8, 40, 120];
static WASH_FRAMES: [&[u8]; 2] = [&WASH_FRAME_0, &WASH_FRAME_1];

static DEFS: [AnimationDef; 4] = [
    AnimationDef::new(&BACKDROP_FRAMES), // 0: amber base coat across the tile
    AnimationDef::new(&BREATHE_FRAMES),  // 1: saturating ramp up and back down
    AnimationDef::new(&TICKER_FRAMES),   // 2: count transfers on the status cells
    AnimationDef::new(&WASH_FRAMES),     // 3: blue wash over both tile halves
];

/// Mock DMA driver that renders each transferred frame to the terminal.
///
/// Stays busy for a fixed number of polls after `start`, the way a real
/// transfer spans tick periods; the demo loop drives the countdown.
#[derive(Default)]
struct ConsoleDma {
    remaining: u8,
    transfers: u32,
}

impl ConsoleDma {
    /// Advance the simulated transfer by one tick.
    fn step(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    fn render(buffers: &BufferSet<'_>) {
        let mut line = String::new();
        for buffer in buffers.iter() {
            match buffer.view() {
                // the byte buffer is the rgb tile, three channels per pixel
                CellView::Byte(cells) => {
                    for pixel in cells.chunks_exact(3) {
                        let _ = write!(line, "\x1b[38;2;{};{};{}m\u{2588}\u{2588}", pixel[0], pixel[1], pixel[2]);
                    }
                    line.push_str("\x1b[0m");
                }
                CellView::Word(cells) => {
                    for value in cells {
                        let _ = write!(line, " {value:>5}");
                    }
                }
            }
        }
        print!("\r{line}  ");
        let _ = io::stdout().flush();
    }
}

impl Transmitter for ConsoleDma {
    fn start(&mut self, buffers: &BufferSet<'_>) {
        self.remaining = DMA_BUSY_TICKS;
        self.transfers += 1;
        Self::render(buffers);
    }

    fn is_busy(&self) -> bool {
        self.remaining > 0
    }
}

fn main() {
    let mut tile = [0u8; TILE_CHANNELS];
    let mut status = [0u16; STATUS_CELLS];

    let mut buffers = BufferSet::new();
    let _ = buffers.push(PixelBuffer::new_u8(&mut tile, 0));
    let _ = buffers.push(PixelBuffer::new_u16(&mut status, TILE_CHANNELS as u16));

    let mut engine = PixelEngine::new(&DEFS[..], &ELEMENTS, buffers, &SYNC);
    engine.setup();
    let mut scheduler = TickScheduler::new(engine, ConsoleDma::default());

    println!(
        "pixelmap preview: 8 rgb pixels + 4 status cells at {} ticks/s",
        DEFAULT_TICK_RATE
    );

    // Synthetic time advanced from wall-clock deltas
    let mut t_ms: u64 = 0;
    let mut last_tick = StdInstant::now();

    for tick in 0..DEMO_TICKS {
        match tick {
            0 => {
                println!("starting backdrop, breathe and status ticker");
                let engine = scheduler.engine_mut();
                let _ = engine.push_animation(0, 1, 1, AnimationModifiers::empty());
                let _ = engine.push_animation(1, 0, 8, AnimationModifiers::empty());
                let _ = engine.push_animation(2, 0, 30, AnimationModifiers::FALLTHROUGH);
            }
            180 => {
                println!("\nstarting blue wash overlay, two loops");
                let _ = scheduler
                    .engine_mut()
                    .push_animation(3, 2, 20, AnimationModifiers::empty());
            }
            360 => {
                println!("\nstopping the status ticker");
                let _ = scheduler.engine_mut().pop_animation();
            }
            _ => {}
        }

        scheduler.transmitter_mut().step();
        let result = scheduler.tick(Instant::from_millis(t_ms));
        std::thread::sleep(StdDuration::from_millis(result.sleep_duration.as_millis()));

        let now = StdInstant::now();
        t_ms = t_ms.wrapping_add(now.duration_since(last_tick).as_millis() as u64);
        last_tick = now;
    }

    println!(
        "\ndone: {} transfers, {} faults, {} animation(s) still active",
        scheduler.transmitter().transfers,
        scheduler.engine().fault_count(),
        scheduler.engine().stack().len()
    );
}
