//! 子命令实现
//!
//! 每个命令自行构造整机（one-shot 模式），与示教器风格的常驻
//! 连接相比更适合脚本化使用。

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use pup_gait::{LegId, Quadruped, RobotConfig, cancel_pair};
use pup_hal::{MockAdc, MockPin, MockPwm};
use pup_kinematics::{LegGeometry, Point2};
use pup_sensor::DistanceEstimator;

/// 加载配置（缺省使用参考硬件配置）
pub fn load_config(path: Option<&Path>) -> Result<RobotConfig> {
    match path {
        Some(path) => RobotConfig::load(path)
            .with_context(|| format!("loading robot config from {}", path.display())),
        None => Ok(RobotConfig::default()),
    }
}

/// 按配置构造整机（Mock PWM 后端）
fn build_robot(config: &RobotConfig) -> Result<Quadruped<MockPwm>> {
    let frequency = config.pwm_frequency_hz;
    Ok(Quadruped::from_config(config, || MockPwm::new(frequency))?)
}

/// 打印四条腿的当前命令角（诊断输出）
fn print_pose(robot: &Quadruped<MockPwm>) {
    for id in LegId::ALL {
        let leg = robot.leg(id);
        println!(
            "  {:<12} shoulder {:>8}  knee {:>8}",
            id,
            leg.shoulder_angle().to_string(),
            leg.knee_angle().to_string()
        );
    }
}

/// 站立
pub fn stand(config: &RobotConfig) -> Result<()> {
    let mut robot = build_robot(config)?;
    robot.stand()?;
    println!("✅ stand");
    print_pose(&robot);
    Ok(())
}

/// 坐下
pub fn sit(config: &RobotConfig) -> Result<()> {
    let mut robot = build_robot(config)?;
    robot.sit()?;
    println!("✅ sit");
    print_pose(&robot);
    Ok(())
}

/// 伸展
pub fn stretch(config: &RobotConfig) -> Result<()> {
    let mut robot = build_robot(config)?;
    robot.stretch()?;
    println!("✅ stretch");
    print_pose(&robot);
    Ok(())
}

/// 执行舞蹈例程
pub fn dance(config: &RobotConfig) -> Result<()> {
    let mut robot = build_robot(config)?;
    let (handle, token) = cancel_pair();
    ctrlc::set_handler(move || handle.cancel()).context("installing Ctrl-C handler")?;

    robot.dance(&token)?;
    println!("✅ dance routine finished");
    Ok(())
}

/// 行走命令参数
#[derive(Args, Debug)]
pub struct WalkCommand {
    /// 行走周期数（缺省一直走到 Ctrl-C）
    #[arg(short = 'n', long)]
    pub cycles: Option<u32>,

    /// 覆盖步态步间隔（毫秒）
    #[arg(long)]
    pub step_interval_ms: Option<u64>,
}

impl WalkCommand {
    /// 执行行走循环
    pub fn execute(&self, config: &RobotConfig) -> Result<()> {
        let mut config = config.clone();
        if let Some(interval) = self.step_interval_ms {
            config.gait.step_interval_ms = interval;
        }

        let mut robot = build_robot(&config)?;
        let (handle, token) = cancel_pair();
        ctrlc::set_handler(move || handle.cancel()).context("installing Ctrl-C handler")?;

        println!("🚶 walking (Ctrl-C to stop)...");
        let cycles = robot.walk(&token, self.cycles)?;

        println!("✅ walk finished after {cycles} cycle(s)");
        print_pose(&robot);
        Ok(())
    }
}

/// 腿选择参数
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LegArg {
    FrontLeft,
    FrontRight,
    RearLeft,
    RearRight,
}

impl From<LegArg> for LegId {
    fn from(arg: LegArg) -> Self {
        match arg {
            LegArg::FrontLeft => LegId::FrontLeft,
            LegArg::FrontRight => LegId::FrontRight,
            LegArg::RearLeft => LegId::RearLeft,
            LegArg::RearRight => LegId::RearRight,
        }
    }
}

/// 单腿指点命令参数
#[derive(Args, Debug)]
pub struct SetLegCommand {
    /// 哪条腿
    #[arg(value_enum)]
    pub leg: LegArg,

    /// 目标 x（沿站立方向，离身体为正）
    #[arg(short, long, allow_hyphen_values = true)]
    pub x: f64,

    /// 目标 y（指向前进方向）
    #[arg(short, long, allow_hyphen_values = true)]
    pub y: f64,
}

impl SetLegCommand {
    /// 执行单腿移动
    pub fn execute(&self, config: &RobotConfig) -> Result<()> {
        let mut robot = build_robot(config)?;
        let id: LegId = self.leg.into();
        let target = Point2::new(self.x, self.y);

        if robot.step_leg(id, target)? {
            let leg = robot.leg(id);
            println!("✅ {id} moved to ({:.2}, {:.2})", self.x, self.y);
            println!(
                "  shoulder {}  knee {}",
                leg.shoulder_angle(),
                leg.knee_angle()
            );
        } else {
            println!("⚠️ target ({:.2}, {:.2}) unreachable, leg not moved", self.x, self.y);
        }
        Ok(())
    }
}

/// 测距命令参数
#[derive(Args, Debug)]
pub struct DistanceCommand {
    /// Mock 采样：LED 点亮时的 ADC 读数
    #[arg(long, default_value_t = 38_000)]
    pub on_reading: u16,

    /// Mock 采样：LED 熄灭时的 ADC 读数
    #[arg(long, default_value_t = 21_000)]
    pub off_reading: u16,
}

impl DistanceCommand {
    /// 执行一次距离读取（Mock ADC）
    pub fn execute(&self) -> Result<()> {
        let mut sensor = DistanceEstimator::new(
            MockAdc::new([self.on_reading, self.off_reading]),
            MockPin::new(),
        )
        .with_settle(std::time::Duration::ZERO);

        let distance = sensor.read()?;
        println!("📏 estimated distance: {distance:.3} (rough units)");
        Ok(())
    }
}

/// 逆解调试命令参数
#[derive(Args, Debug)]
pub struct SolveCommand {
    /// 目标 x
    #[arg(short, long, allow_hyphen_values = true)]
    pub x: f64,

    /// 目标 y
    #[arg(short, long, allow_hyphen_values = true)]
    pub y: f64,

    /// 第一段连杆长度
    #[arg(long, default_value_t = 4.0)]
    pub upper: f64,

    /// 第二段连杆长度
    #[arg(long, default_value_t = 8.0)]
    pub lower: f64,
}

impl SolveCommand {
    /// 打印逆解结果
    pub fn execute(&self) -> Result<()> {
        let geometry = LegGeometry::new(self.upper, self.lower)?;
        let target = Point2::new(self.x, self.y);
        let solutions = geometry.solve(target);

        if solutions.is_empty() {
            println!(
                "⚠️ ({:.2}, {:.2}) unreachable: annulus is [{:.2}, {:.2}]",
                self.x,
                self.y,
                geometry.min_reach(),
                geometry.max_reach()
            );
            return Ok(());
        }

        for (i, solution) in solutions.iter().enumerate() {
            let foot = geometry.forward(*solution);
            println!(
                "solution {i}: shoulder {:>8} ({:.4} rad), knee {:>8} ({:.4} rad) → foot ({:.3}, {:.3})",
                solution.shoulder.to_deg().to_string(),
                solution.shoulder.value(),
                solution.knee.to_deg().to_string(),
                solution.knee.value(),
                foot.x,
                foot.y,
            );
        }
        Ok(())
    }
}
