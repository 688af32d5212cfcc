//! PWM-dimmed LCD backlight.

use embassy_nrf::peripherals::PWM0;
use embassy_nrf::pwm::SimplePwm;

use menu_panel::ui::theme::{duty_for, Backlight};

/// Counter top; 1 MHz / 1000 = 1 kHz, well above visible flicker.
const PWM_PERIOD: u16 = 1000;

pub struct PwmBacklight {
    pwm: SimplePwm<'static, PWM0>,
}

impl PwmBacklight {
    pub fn new(mut pwm: SimplePwm<'static, PWM0>) -> Self {
        pwm.set_max_duty(PWM_PERIOD);
        Self { pwm }
    }
}

impl Backlight for PwmBacklight {
    fn set_brightness(&mut self, percent: u8) {
        self.pwm.set_duty(0, duty_for(percent, PWM_PERIOD));
    }
}
