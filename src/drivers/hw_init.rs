//! One-shot ADC1 bring-up.
//!
//! Configures the one-shot ADC unit for the CHA1 analog input using raw
//! ESP-IDF sys calls.  Called once from `main()` before the polling loop.
//! UART and I2C are brought up through `esp-idf-hal` drivers in `main`.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    AdcChannelFailed(i32),
    AdcResolutionUnsupported(u8),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::AdcChannelFailed(rc) => write!(f, "ADC1 channel config failed (rc={})", rc),
            Self::AdcResolutionUnsupported(bits) => write!(f, "ADC1 cannot sample at {} bits", bits),
        }
    }
}

impl core::error::Error for HwInitError {}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop ADC read path.  No concurrent access is possible because
/// `init_adc()` completes before the polling loop starts.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
fn adc_bitwidth(bits: u8) -> Result<adc_bitwidth_t, HwInitError> {
    match bits {
        9 => Ok(adc_bitwidth_t_ADC_BITWIDTH_9),
        10 => Ok(adc_bitwidth_t_ADC_BITWIDTH_10),
        11 => Ok(adc_bitwidth_t_ADC_BITWIDTH_11),
        12 => Ok(adc_bitwidth_t_ADC_BITWIDTH_12),
        _ => Err(HwInitError::AdcResolutionUnsupported(bits)),
    }
}

/// Configure ADC1 for one-shot reads on `channel` at `bits` resolution.
#[cfg(target_os = "espidf")]
pub fn init_adc(channel: u8, bits: u8) -> Result<(), HwInitError> {
    let bitwidth = adc_bitwidth(bits)?;
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth,
    };
    // SAFETY: handle initialised just above.
    let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), channel as adc_channel_t, &chan_cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcChannelFailed(ret));
    }

    log::info!("hw_init: ADC1 CH{} configured ({}-bit)", channel, bits);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_adc(_channel: u8, bits: u8) -> Result<(), HwInitError> {
    if !crate::config::ADC_RESOLUTION_BITS.contains(&bits) {
        return Err(HwInitError::AdcResolutionUnsupported(bits));
    }
    log::info!("hw_init(sim): ADC init skipped");
    Ok(())
}

/// One raw ADC1 reading, or the ESP-IDF status code on failure.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u8) -> Result<u16, i32> {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract: single-threaded main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel as adc_channel_t, &mut raw) };
    if ret != ESP_OK as i32 {
        return Err(ret);
    }
    Ok(raw.max(0) as u16)
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(_channel: u8) -> Result<u16, i32> {
    Ok(0)
}
