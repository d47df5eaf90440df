//! GPIO / peripheral pin assignments for the EcoWork Hub board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// DHT22 temperature/humidity sensor: single-wire open-drain data line.
pub const DHT_GPIO: i32 = 4;

/// LDR module analog output.  ADC1 channel 6 (GPIO 34, input-only).
/// Lower raw value = more light.
pub const LIGHT_ADC_GPIO: i32 = 34;

/// HC-SR04 trigger (output) and echo (input).
pub const ULTRASONIC_TRIG_GPIO: i32 = 5;
pub const ULTRASONIC_ECHO_GPIO: i32 = 18;

// ---------------------------------------------------------------------------
// Indicator LEDs
// ---------------------------------------------------------------------------

/// White LED: office light.
pub const LED_WHITE_GPIO: i32 = 19;
/// Red LED: climate alert / "air conditioning".
pub const LED_RED_GPIO: i32 = 23;
/// Green LED: eco mode / "fan".
pub const LED_GREEN_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// I²C bus (16x2 LCD behind a PCF8574 backpack)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 21;
pub const I2C_SCL_GPIO: i32 = 22;
/// 7-bit address of the LCD backpack.
pub const LCD_I2C_ADDR: u8 = 0x27;
/// I²C bus clock.
pub const I2C_BAUD_HZ: u32 = 100_000;
