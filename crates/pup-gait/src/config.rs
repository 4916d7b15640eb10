//! 整机配置
//!
//! TOML 格式的机器人配置：四条腿的标定、几何与侧别，步态节奏
//! 参数。配置只描述数据；加载后立即构造各领域对象完成校验，
//! 非法配置在启动期报错。

use std::path::Path;
use std::time::Duration;

use pup_kinematics::{KinematicsError, LegGeometry};
use pup_leg::Side;
use pup_servo::{ServoCalibration, ServoError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 配置错误类型
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// TOML 解析失败
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// 舵机标定非法
    #[error(transparent)]
    Servo(#[from] ServoError),

    /// 腿部几何非法
    #[error(transparent)]
    Kinematics(#[from] KinematicsError),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, ConfigError>;

/// 单路舵机的脉宽标定（微秒）
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PulseConfig {
    /// 最小脉宽（µs）
    pub pulse_min_us: u64,
    /// 中位脉宽（µs）
    pub pulse_mid_us: u64,
    /// 最大脉宽（µs）
    pub pulse_max_us: u64,
}

impl Default for PulseConfig {
    /// 参考硬件实测值：0.6 / 1.6 / 2.6 ms
    fn default() -> Self {
        Self {
            pulse_min_us: 600,
            pulse_mid_us: 1600,
            pulse_max_us: 2600,
        }
    }
}

impl PulseConfig {
    /// 构造标定（完成校验）
    pub fn to_calibration(self, frequency_hz: u32) -> Result<ServoCalibration> {
        Ok(ServoCalibration::new(
            Duration::from_micros(self.pulse_min_us),
            Duration::from_micros(self.pulse_mid_us),
            Duration::from_micros(self.pulse_max_us),
            frequency_hz,
        )?)
    }
}

/// 单条腿的配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegConfig {
    /// 腿所在侧
    pub side: Side,
    /// 第一段连杆长度（髋到膝）
    pub upper: f64,
    /// 第二段连杆长度（膝到足端）
    pub lower: f64,
    /// 髋舵机标定
    #[serde(default)]
    pub shoulder: PulseConfig,
    /// 膝舵机标定
    #[serde(default)]
    pub knee: PulseConfig,
}

impl LegConfig {
    fn with_side(side: Side) -> Self {
        Self {
            side,
            upper: 4.0,
            lower: 8.0,
            shoulder: PulseConfig::default(),
            knee: PulseConfig::default(),
        }
    }

    /// 构造腿部几何（完成校验）
    pub fn geometry(&self) -> Result<LegGeometry> {
        Ok(LegGeometry::new(self.upper, self.lower)?)
    }
}

/// 四条腿的配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegsConfig {
    /// 左前腿
    pub front_left: LegConfig,
    /// 右前腿
    pub front_right: LegConfig,
    /// 左后腿
    pub rear_left: LegConfig,
    /// 右后腿
    pub rear_right: LegConfig,
}

impl Default for LegsConfig {
    fn default() -> Self {
        Self {
            front_left: LegConfig::with_side(Side::Left),
            front_right: LegConfig::with_side(Side::Right),
            rear_left: LegConfig::with_side(Side::Left),
            rear_right: LegConfig::with_side(Side::Right),
        }
    }
}

/// 步态节奏与姿态目标
///
/// 目标点位于腿部局部平面：x 沿站立方向（离身体为正），y 指向
/// 前进方向。默认值按参考几何（4 + 8）调过，保证全部姿态落在
/// 两侧舵机行程内。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaitConfig {
    /// 步态步之间的停顿（毫秒）
    pub step_interval_ms: u64,
    /// 站立姿态目标
    pub stand: [f64; 2],
    /// 坐姿后腿目标
    pub sit_rear: [f64; 2],
    /// 坐姿前腿目标
    pub sit_front: [f64; 2],
    /// 伸展姿态目标
    pub stretch: [f64; 2],
    /// 行走步幅（沿 y 前移量）
    pub stride: f64,
    /// 迈步抬腿量（沿 x 缩短量）
    pub lift: f64,
}

impl Default for GaitConfig {
    fn default() -> Self {
        Self {
            step_interval_ms: 250,
            stand: [9.5, 0.0],
            sit_rear: [9.0, -3.0],
            sit_front: [9.5, 2.0],
            stretch: [11.5, 2.5],
            stride: 1.5,
            lift: 0.5,
        }
    }
}

impl GaitConfig {
    /// 步态步之间的停顿
    #[inline]
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }
}

/// 整机配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobotConfig {
    /// PWM 频率（Hz），所有舵机共用
    #[serde(default = "default_pwm_frequency")]
    pub pwm_frequency_hz: u32,
    /// 步态参数
    #[serde(default)]
    pub gait: GaitConfig,
    /// 四条腿
    #[serde(default)]
    pub legs: LegsConfig,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            pwm_frequency_hz: default_pwm_frequency(),
            gait: GaitConfig::default(),
            legs: LegsConfig::default(),
        }
    }
}

fn default_pwm_frequency() -> u32 {
    50
}

impl RobotConfig {
    /// 从 TOML 文本解析配置并完成校验
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// 从文件加载配置
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// 校验全部标定与几何
    ///
    /// 逐腿构造领域对象；任何一项非法立即返回错误。
    pub fn validate(&self) -> Result<()> {
        for leg in [
            &self.legs.front_left,
            &self.legs.front_right,
            &self.legs.rear_left,
            &self.legs.rear_right,
        ] {
            leg.geometry()?;
            leg.shoulder.to_calibration(self.pwm_frequency_hz)?;
            leg.knee.to_calibration(self.pwm_frequency_hz)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RobotConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.legs.front_left.side, Side::Left);
        assert_eq!(config.legs.rear_right.side, Side::Right);
    }

    #[test]
    fn test_default_pwm_frequency() {
        // 空配置回落到 50 Hz
        let config = RobotConfig::from_toml_str("").unwrap();
        assert_eq!(config.pwm_frequency_hz, 50);
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config = RobotConfig::from_toml_str(
            r#"
            [gait]
            step_interval_ms = 100
            stand = [9.5, 0.0]
            sit_rear = [9.0, -3.0]
            sit_front = [9.5, 2.0]
            stretch = [11.5, 2.5]
            stride = 1.0
            lift = 0.5
            "#,
        )
        .unwrap();

        assert_eq!(config.gait.step_interval(), Duration::from_millis(100));
        assert_eq!(config.gait.stride, 1.0);
    }

    #[test]
    fn test_parse_leg_override() {
        let config = RobotConfig::from_toml_str(
            r#"
            [legs.front_left]
            side = "left"
            upper = 5.0
            lower = 9.0

            [legs.front_right]
            side = "right"
            upper = 5.0
            lower = 9.0

            [legs.rear_left]
            side = "left"
            upper = 5.0
            lower = 9.0

            [legs.rear_right]
            side = "right"
            upper = 5.0
            lower = 9.0
            "#,
        )
        .unwrap();

        assert_eq!(config.legs.front_left.upper, 5.0);
        assert_eq!(config.legs.rear_right.lower, 9.0);
    }

    #[test]
    fn test_invalid_geometry_rejected_on_load() {
        let result = RobotConfig::from_toml_str(
            r#"
            [legs.front_left]
            side = "left"
            upper = 0.0
            lower = 8.0

            [legs.front_right]
            side = "right"
            upper = 4.0
            lower = 8.0

            [legs.rear_left]
            side = "left"
            upper = 4.0
            lower = 8.0

            [legs.rear_right]
            side = "right"
            upper = 4.0
            lower = 8.0
            "#,
        );

        assert!(matches!(result, Err(ConfigError::Kinematics(_))));
    }

    #[test]
    fn test_invalid_calibration_rejected_on_load() {
        let mut config = RobotConfig::default();
        config.legs.front_left.shoulder.pulse_mid_us = 100;

        assert!(matches!(config.validate(), Err(ConfigError::Servo(_))));
    }

    #[test]
    fn test_round_trip_serialization() {
        let config = RobotConfig::default();
        let text = toml::to_string(&config).unwrap();
        let parsed = RobotConfig::from_toml_str(&text).unwrap();

        assert_eq!(parsed.pwm_frequency_hz, config.pwm_frequency_hz);
        assert_eq!(parsed.gait.stand, config.gait.stand);
    }
}
