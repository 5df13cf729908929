//! Column names as constants for type safety.
//!
//! Names match the headers produced by the extraction step and consumed by the
//! plotting front end, so they are kept byte-for-byte (including units and
//! spaces).

/// Shared timestamp column of every table
pub const TIMESTAMP: &str = "Timestamp";

// =============================================================================
// Electrical table (Echem_Extract.csv)
// =============================================================================

/// Cell voltage in volts
pub const VOLTAGE: &str = "Voltage(V)";
/// Cell current in amperes, as delivered by the extraction step
pub const CURRENT_A: &str = "Current(A)";
/// Cycle counter of the cycler (categorical)
pub const CYCLE_INDEX: &str = "Cycle_Index";
/// Optional cycler step counter; step 1 is the initial rest
pub const STEP_INDEX: &str = "Step_Index";

// =============================================================================
// Optical table (image_luminance.csv)
// =============================================================================

/// Mean greyscale value of a frame
pub const LUMINANCE: &str = "Luminance";

// =============================================================================
// Combined table (combined_data.csv)
// =============================================================================

/// Optical brightness carried over from the luminance column
pub const BRIGHTNESS: &str = "Brightness";
/// Smoothed brightness
pub const BRIGHTNESS_SMOOTH: &str = "Brightness_smooth";
/// Smoothed voltage
pub const VOLTAGE_SMOOTH: &str = "Voltage(V)_smooth";
/// Cell current in milliamperes
pub const CURRENT_MA: &str = "Current(mA)";
/// Smoothed current in milliamperes
pub const CURRENT_MA_SMOOTH: &str = "Current(mA)_smooth";
/// Hours elapsed since the first optical sample
pub const TEST_TIME_H: &str = "Test Time (h)";
/// First difference of smoothed brightness over test time
pub const BRIGHTNESS_DERIVATIVE: &str = "Brightness Derivative";
/// Smoothed brightness derivative
pub const BRIGHTNESS_DERIVATIVE_SMOOTH: &str = "Brightness Derivative_smooth";

/// Required columns of the electrical input table
pub const ELECTRICAL_REQUIRED: [&str; 4] = [TIMESTAMP, VOLTAGE, CURRENT_A, CYCLE_INDEX];

/// Required columns of the optical input table
pub const OPTICAL_REQUIRED: [&str; 2] = [TIMESTAMP, LUMINANCE];

/// Columns of the combined output table, in output order
pub const COMBINED: [&str; 11] = [
    TIMESTAMP,
    BRIGHTNESS,
    BRIGHTNESS_SMOOTH,
    VOLTAGE,
    VOLTAGE_SMOOTH,
    CURRENT_MA,
    CURRENT_MA_SMOOTH,
    CYCLE_INDEX,
    TEST_TIME_H,
    BRIGHTNESS_DERIVATIVE,
    BRIGHTNESS_DERIVATIVE_SMOOTH,
];
