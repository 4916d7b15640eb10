//! 记录型 Mock 外设
//!
//! 每个 Mock 外设都会记录收到的全部命令，测试据此断言上层
//! 发出的硬件指令序列；也可以注入一次性故障来验证错误路径。

use std::collections::VecDeque;
use std::time::Duration;
use tracing::trace;

use crate::{AdcInput, DigitalOutput, HalError, PwmOutput};

/// 记录型 PWM 输出
///
/// 记录每一次命令的脉宽。`fail_next` 置位后，下一次命令返回
/// 设备错误且不记录。
#[derive(Debug)]
pub struct MockPwm {
    frequency_hz: u32,
    pulses: Vec<Duration>,
    fail_next: bool,
}

impl MockPwm {
    /// 创建 Mock PWM 输出
    pub fn new(frequency_hz: u32) -> Self {
        Self {
            frequency_hz,
            pulses: Vec::new(),
            fail_next: false,
        }
    }

    /// 全部已命令的脉宽（按命令顺序）
    pub fn pulses(&self) -> &[Duration] {
        &self.pulses
    }

    /// 最后一次命令的脉宽
    pub fn last_pulse(&self) -> Option<Duration> {
        self.pulses.last().copied()
    }

    /// 让下一次命令失败一次
    pub fn fail_next(&mut self) {
        self.fail_next = true;
    }
}

impl PwmOutput for MockPwm {
    fn set_pulse_width(&mut self, width: Duration) -> Result<(), HalError> {
        if self.fail_next {
            self.fail_next = false;
            return Err(HalError::device("injected PWM fault"));
        }

        trace!(pulse_us = width.as_micros() as u64, "mock PWM pulse");
        self.pulses.push(width);
        Ok(())
    }

    fn frequency(&self) -> u32 {
        self.frequency_hz
    }
}

/// 脚本化 Mock ADC
///
/// 按入队顺序返回预置采样值，取尽后返回 [`HalError::Exhausted`]。
#[derive(Debug, Default)]
pub struct MockAdc {
    readings: VecDeque<u16>,
}

impl MockAdc {
    /// 创建带预置采样序列的 Mock ADC
    pub fn new(readings: impl IntoIterator<Item = u16>) -> Self {
        Self {
            readings: readings.into_iter().collect(),
        }
    }

    /// 追加采样值
    pub fn push(&mut self, reading: u16) {
        self.readings.push_back(reading);
    }
}

impl AdcInput for MockAdc {
    fn read_u16(&mut self) -> Result<u16, HalError> {
        self.readings.pop_front().ok_or(HalError::Exhausted)
    }
}

/// 记录型数字输出引脚
#[derive(Debug, Default)]
pub struct MockPin {
    level: bool,
    transitions: Vec<bool>,
}

impl MockPin {
    /// 创建 Mock 引脚（初始低电平）
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前电平
    pub fn is_high(&self) -> bool {
        self.level
    }

    /// 全部电平变化（按命令顺序）
    pub fn transitions(&self) -> &[bool] {
        &self.transitions
    }
}

impl DigitalOutput for MockPin {
    fn set_high(&mut self) -> Result<(), HalError> {
        self.level = true;
        self.transitions.push(true);
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), HalError> {
        self.level = false;
        self.transitions.push(false);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_pwm_records_pulses() {
        let mut pwm = MockPwm::new(50);
        pwm.set_pulse_width(Duration::from_micros(1500)).unwrap();
        pwm.set_pulse_width(Duration::from_micros(1600)).unwrap();

        assert_eq!(pwm.frequency(), 50);
        assert_eq!(pwm.pulses().len(), 2);
        assert_eq!(pwm.last_pulse(), Some(Duration::from_micros(1600)));
    }

    #[test]
    fn test_mock_pwm_injected_fault() {
        let mut pwm = MockPwm::new(50);
        pwm.fail_next();

        assert!(pwm.set_pulse_width(Duration::from_micros(1500)).is_err());
        assert!(pwm.pulses().is_empty());

        // 故障只生效一次
        assert!(pwm.set_pulse_width(Duration::from_micros(1500)).is_ok());
        assert_eq!(pwm.pulses().len(), 1);
    }

    #[test]
    fn test_mock_adc_scripted_readings() {
        let mut adc = MockAdc::new([100, 200]);
        assert_eq!(adc.read_u16().unwrap(), 100);
        assert_eq!(adc.read_u16().unwrap(), 200);
        assert!(matches!(adc.read_u16(), Err(HalError::Exhausted)));
    }

    #[test]
    fn test_mock_pin_transitions() {
        let mut pin = MockPin::new();
        assert!(!pin.is_high());

        pin.set_high().unwrap();
        pin.set_low().unwrap();

        assert!(!pin.is_high());
        assert_eq!(pin.transitions(), &[true, false]);
    }
}
