//! # Pup 光学测距
//!
//! LED + 光敏电阻（LDR）构成的粗糙测距器：分别在 LED 点亮与
//! 熄灭时采样 LDR，两次读数之差就是 LED 光对传感器的贡献
//! （环境光被差分消掉）。按球面扩散模型
//! `flux ∝ luminosity / (4πr²)` 反推距离。
//!
//! 这是与运动控制无关的独立数据通路：量纲粗糙（标定常数以
//! ADC 计数为单位），只用于障碍物的有无判断，不参与闭环。

use std::time::Duration;

use pup_hal::{AdcInput, DigitalOutput, HalError};
use thiserror::Error;
use tracing::{debug, trace};

/// 传感器错误类型
#[derive(Debug, Error)]
pub enum SensorError {
    /// 硬件读取失败
    #[error(transparent)]
    Hal(#[from] HalError),

    /// 差分光通量为零（LED 光未到达传感器），距离无定义
    #[error("No differential flux measured (LED light not reaching the sensor)")]
    NoSignal,
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, SensorError>;

/// 参考硬件实测的 LED 发光强度（ADC 计数单位）
const DEFAULT_LED_LUMINOSITY: f64 = 45_000.0;

/// LED / LDR 静置时间，等待光强与读数稳定
const DEFAULT_SETTLE: Duration = Duration::from_millis(100);

/// 光学距离估计器
///
/// 独占持有一路 ADC 输入（LDR）与一路数字输出（LED）。
#[derive(Debug)]
pub struct DistanceEstimator<A: AdcInput, D: DigitalOutput> {
    ldr: A,
    led: D,
    luminosity: f64,
    settle: Duration,
}

impl<A: AdcInput, D: DigitalOutput> DistanceEstimator<A, D> {
    /// 创建距离估计器（使用参考硬件的标定常数）
    pub fn new(ldr: A, led: D) -> Self {
        Self {
            ldr,
            led,
            luminosity: DEFAULT_LED_LUMINOSITY,
            settle: DEFAULT_SETTLE,
        }
    }

    /// 覆盖 LED 发光强度标定
    pub fn with_luminosity(mut self, luminosity: f64) -> Self {
        self.luminosity = luminosity;
        self
    }

    /// 覆盖静置时间（测试中可设为零）
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// 读取一次距离估计
    ///
    /// 依次采样 LED 亮 / 灭两种状态（各静置一段时间），按差分
    /// 光通量反推距离。返回值量纲粗糙，只适合阈值判断。
    pub fn read(&mut self) -> Result<f64> {
        self.led.set_high()?;
        spin_sleep::sleep(self.settle);
        let on = self.ldr.read_u16()?;

        self.led.set_low()?;
        spin_sleep::sleep(self.settle);
        let off = self.ldr.read_u16()?;

        // 差分消除环境光；LED 灯位于传感器旁，反射越近通量越大
        let flux = f64::from(i32::from(on) - i32::from(off)).abs();
        trace!(on, off, flux, "distance sample");

        if flux == 0.0 {
            return Err(SensorError::NoSignal);
        }

        // 球面扩散：dist = sqrt(luminosity / (4π·flux))
        let distance = (self.luminosity / (4.0 * std::f64::consts::PI * flux)).sqrt();
        debug!(distance, "distance estimated");
        Ok(distance)
    }
}
