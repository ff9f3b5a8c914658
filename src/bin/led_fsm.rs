//! STM32F103 Blue Pill LED Pattern Controller
//! =============================================================================================
//!
//! Four buttons drive a table-dispatched state machine (IDLE, LED_SET, BLINK, PAUSE) that
//! selects how many of four LEDs are lit and blinks them on request.
//!
//! Hardware Connections:
//!   LEDs (active low, anode to 3.3V through resistor):
//!      LED1 -> PA0
//!      LED2 -> PA1
//!      LED3 -> PA2
//!      LED4 -> PA3
//!
//!   Buttons (to GND, internal pull-up):
//!      INC         -> PB12
//!      DEC         -> PB13
//!      START/PAUSE -> PB14
//!      ABORT       -> PB15
//!
//!   OLED Display (SSD1306 128x64) -> Blue Pill
//!      GND  -> GND
//!      VCC  -> 5V
//!      SDA  -> PB7
//!      SCL  -> PB6
//!
//! Tasks:
//! 1. button_task: polls and debounces the buttons, forwards signals
//! 2. fsm_task: the only place signals are dispatched
//! 3. blink_task: periodic LED toggling while BLINK is active
//! 4. oled_task: mirrors state, LED count and last message on the display
//!
//! Build: cargo build --release --features firmware --target thumbv7m-none-eabi

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_stm32::{
    bind_interrupts,
    gpio::{Input, Level, Output, Pull, Speed},
    i2c::{self, ErrorInterruptHandler, EventInterruptHandler},
    peripherals,
    time::Hertz,
};
use embassy_sync::{
    blocking_mutex::{
        Mutex,
        raw::{CriticalSectionRawMutex, ThreadModeRawMutex},
    },
    channel::{Channel, Receiver, Sender},
};
use embassy_time::{Duration, Ticker, Timer};
use heapless::String;
use ssd1306::{I2CDisplayInterface, Ssd1306, prelude::*};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use led_fsm::config::{BOOT_FLASH_CYCLES, BOOT_FLASH_HALF_PERIOD, LED_COUNT};
use led_fsm::fsm::{Fsm, Signal, State};
use led_fsm::hardware::{GpioButton, GpioLed, LedBank, LedGroup, StatusOutput, StatusView};
use led_fsm::signal_source::{ButtonMap, SignalSource};
use led_fsm::timer::{BlinkControl, BlinkTimer};
use led_fsm::{DebounceConfig, FsmConfig, TimerError};

type Leds = LedGroup<GpioLed<Output<'static>>, LED_COUNT>;

// Shared between the FSM task and the blink task
type SharedLeds = Mutex<CriticalSectionRawMutex, RefCell<Leds>>;

type Buttons = SignalSource<GpioButton<Input<'static>>>;

static LEDS: StaticCell<SharedLeds> = StaticCell::new();

static BLINK: BlinkControl<CriticalSectionRawMutex> = BlinkControl::new();

// Debounced button signals, consumed only by the FSM task
static SIGNALS: Channel<ThreadModeRawMutex, Signal, 4> = Channel::new();

// Status frames for the OLED
static STATUS: Channel<ThreadModeRawMutex, StatusLine, 2> = Channel::new();

/// One OLED frame worth of state.
struct StatusLine {
    state: State,
    led_count: u8,
    message: String<32>,
}

/// Board seen by the state handlers.
struct FirmwareBoard {
    leds: &'static SharedLeds,
    timer: &'static BlinkControl<CriticalSectionRawMutex>,
    last_message: String<32>,
}

impl LedBank for FirmwareBoard {
    fn set_led(&mut self, index: usize) {
        self.leds.lock(|leds| leds.borrow_mut().set_led(index));
    }

    fn clear_led(&mut self, index: usize) {
        self.leds.lock(|leds| leds.borrow_mut().clear_led(index));
    }

    fn toggle_led(&mut self, index: usize) {
        self.leds.lock(|leds| leds.borrow_mut().toggle_led(index));
    }
}

impl BlinkTimer for FirmwareBoard {
    fn create(&mut self, period: Duration) -> Result<(), TimerError> {
        self.timer.create(period)
    }

    fn start(&mut self, led_count: u8) -> Result<(), TimerError> {
        self.timer.start(led_count)
    }

    fn stop(&mut self) {
        self.timer.stop();
    }
}

impl StatusOutput for FirmwareBoard {
    fn emit(&mut self, message: &str) {
        info!("{}", message);
        self.last_message.clear();
        // longer than the display line: keep the log entry, drop the screen text
        let _ = self.last_message.push_str(message);
    }
}

/// Main application entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    // Initialize peripherals with default configuration
    let p = embassy_stm32::init(Default::default());
    info!("LED FSM controller starting");

    // Bind I2C interrupt handlers
    bind_interrupts!(struct Irqs {
        I2C1_EV => EventInterruptHandler<peripherals::I2C1>;
        I2C1_ER => ErrorInterruptHandler<peripherals::I2C1>;
    });

    // LEDs start high (off)
    let mut leds: Leds = LedGroup::new([
        GpioLed::new(Output::new(p.PA0, Level::High, Speed::Low)),
        GpioLed::new(Output::new(p.PA1, Level::High, Speed::Low)),
        GpioLed::new(Output::new(p.PA2, Level::High, Speed::Low)),
        GpioLed::new(Output::new(p.PA3, Level::High, Speed::Low)),
    ]);
    boot_flash(&mut leds).await;
    let leds: &'static SharedLeds = LEDS.init(Mutex::new(RefCell::new(leds)));

    // Buttons, in ButtonMap order
    let buttons = [
        GpioButton::new(Input::new(p.PB12, Pull::Up)),
        GpioButton::new(Input::new(p.PB13, Pull::Up)),
        GpioButton::new(Input::new(p.PB14, Pull::Up)),
        GpioButton::new(Input::new(p.PB15, Pull::Up)),
    ];
    let debounce = DebounceConfig::default();
    debounce.validate().expect("debounce configuration");
    let source = SignalSource::new(buttons, ButtonMap::default(), &debounce);

    // Configure I2C peripheral at 400kHz
    let i2c = i2c::I2c::new(
        p.I2C1,
        p.PB6,
        p.PB7,
        Irqs,
        p.DMA1_CH6,
        p.DMA1_CH7,
        Hertz::khz(400),
        Default::default(),
    );

    let board = FirmwareBoard {
        leds,
        timer: &BLINK,
        last_message: String::new(),
    };
    let fsm = Fsm::new(board, &FsmConfig::default()).expect("state machine startup");

    spawner
        .spawn(oled_task(i2c, STATUS.receiver()))
        .expect("Failed to spawn oled task");
    spawner
        .spawn(blink_task(leds, &BLINK))
        .expect("Failed to spawn blink task");
    spawner
        .spawn(fsm_task(fsm, SIGNALS.receiver(), STATUS.sender()))
        .expect("Failed to spawn fsm task");
    spawner
        .spawn(button_task(source, SIGNALS.sender(), debounce.poll_interval))
        .expect("Failed to spawn button task");
}

/// Power-up indication: flash every LED a few times before IDLE is entered.
async fn boot_flash(leds: &mut Leds) {
    for _ in 0..BOOT_FLASH_CYCLES {
        leds.all_on();
        Timer::after(BOOT_FLASH_HALF_PERIOD).await;
        leds.all_off();
        Timer::after(BOOT_FLASH_HALF_PERIOD).await;
    }
}

/// Button Polling Task
///
/// Samples all four lines every poll interval and forwards confirmed presses.
#[embassy_executor::task]
async fn button_task(
    mut source: Buttons,
    signals: Sender<'static, ThreadModeRawMutex, Signal, 4>,
    poll_interval: Duration,
) {
    let mut ticker = Ticker::every(poll_interval);

    loop {
        for signal in source.poll() {
            info!("Signal: {}", signal);
            signals.send(signal).await;
        }
        ticker.next().await;
    }
}

/// State Machine Task
///
/// Sole owner of the FSM, so dispatch is never re-entered.
#[embassy_executor::task]
async fn fsm_task(
    mut fsm: Fsm<FirmwareBoard>,
    signals: Receiver<'static, ThreadModeRawMutex, Signal, 4>,
    status: Sender<'static, ThreadModeRawMutex, StatusLine, 2>,
) {
    fsm.start();
    publish(&fsm, &status);

    loop {
        let signal = signals.receive().await;
        let outcome = fsm.dispatch(signal);
        info!("{} -> {}, now {}", signal, outcome, fsm.state());
        publish(&fsm, &status);
    }
}

fn publish(fsm: &Fsm<FirmwareBoard>, status: &Sender<'static, ThreadModeRawMutex, StatusLine, 2>) {
    let line = StatusLine {
        state: fsm.state(),
        led_count: fsm.context().led_count(),
        message: fsm.board().last_message.clone(),
    };
    if status.try_send(line).is_err() {
        warn!("status display busy, frame dropped");
    }
}

/// Blink Task
///
/// Idles until the timer is started, then toggles the selected LEDs every period until a
/// tick finds it stopped.
#[embassy_executor::task]
async fn blink_task(
    leds: &'static SharedLeds,
    timer: &'static BlinkControl<CriticalSectionRawMutex>,
) {
    loop {
        let period = timer.wait_started().await;
        let mut ticker = Ticker::every(period);

        loop {
            ticker.next().await;
            let fired = timer.fire(|led_count| {
                leds.lock(|leds| {
                    let mut leds = leds.borrow_mut();
                    for index in 0..usize::from(led_count) {
                        leds.toggle_led(index);
                    }
                })
            });
            if !fired {
                break;
            }
        }
    }
}

/// OLED Status Task
#[embassy_executor::task]
async fn oled_task(
    i2c: i2c::I2c<'static, embassy_stm32::mode::Async>,
    frames: Receiver<'static, ThreadModeRawMutex, StatusLine, 2>,
) {
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();

    display.init().unwrap();

    loop {
        let frame = frames.receive().await;
        display.clear_buffer();
        StatusView {
            state: frame.state,
            led_count: frame.led_count,
            message: &frame.message,
        }
        .draw(&mut display)
        .unwrap();
        display.flush().unwrap();
    }
}
