//! # Pup 硬件抽象层
//!
//! 把底层板卡外设抽象成三类不透明的汇端：PWM 输出、ADC 输入、
//! 数字输出。上层（舵机、传感器）只依赖这里的 trait，不关心
//! 具体的寄存器或驱动实现。
//!
//! 真实硬件后端（各平台的 PWM/ADC 驱动）由板级支持包提供，
//! 不在本仓库范围内；`mock` feature 提供记录型实现，用于测试
//! 与无硬件演示。

use std::time::Duration;
use thiserror::Error;

#[cfg(feature = "mock")]
pub mod mock;

#[cfg(feature = "mock")]
pub use mock::{MockAdc, MockPin, MockPwm};

/// 硬件抽象层统一错误类型
#[derive(Error, Debug)]
pub enum HalError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Device Error: {0}")]
    Device(String),
    #[error("ADC has no more readings")]
    Exhausted,
}

impl HalError {
    /// 创建设备错误
    pub fn device(message: impl Into<String>) -> Self {
        Self::Device(message.into())
    }
}

/// PWM 输出汇端
///
/// 舵机控制的唯一硬件接口：给定脉宽，以构造时配置的固定频率
/// 输出。脉宽的合法范围由上层（舵机标定）负责，汇端不做业务
/// 校验。
pub trait PwmOutput {
    /// 设置输出脉宽
    fn set_pulse_width(&mut self, width: Duration) -> Result<(), HalError>;

    /// 配置的 PWM 频率（Hz）
    fn frequency(&self) -> u32;
}

/// ADC 输入源
pub trait AdcInput {
    /// 读取一次 16 位原始采样值
    fn read_u16(&mut self) -> Result<u16, HalError>;
}

/// 数字输出引脚
pub trait DigitalOutput {
    /// 拉高电平
    fn set_high(&mut self) -> Result<(), HalError>;

    /// 拉低电平
    fn set_low(&mut self) -> Result<(), HalError>;
}
