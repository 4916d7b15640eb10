//! 整机四足编排
//!
//! 提供枚举索引的四腿容器与姿态 / 步态脚本。脚本是严格的
//! "腿命令 + 阻塞延时"序列：行走采用爬行步序（一次只动一条
//! 腿），每个步态步的边界轮询一次取消令牌。

use std::fmt;
use std::ops::{Index, IndexMut};

use pup_hal::PwmOutput;
use pup_kinematics::Point2;
use pup_leg::Leg;
use pup_servo::Servo;
use tracing::{debug, info};

use crate::cancel::CancelToken;
use crate::config::{GaitConfig, LegConfig, RobotConfig};
use crate::{GaitError, Result};

/// 腿枚举
///
/// 表示四足机器人的 4 条腿。使用枚举提供编译期类型安全。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegId {
    /// 左前腿
    FrontLeft = 0,
    /// 右前腿
    FrontRight = 1,
    /// 左后腿
    RearLeft = 2,
    /// 右后腿
    RearRight = 3,
}

impl LegId {
    /// 所有腿的数组
    pub const ALL: [LegId; 4] = [
        LegId::FrontLeft,
        LegId::FrontRight,
        LegId::RearLeft,
        LegId::RearRight,
    ];

    /// 爬行步序：对角交替，保持静态稳定
    pub const CRAWL_ORDER: [LegId; 4] = [
        LegId::FrontLeft,
        LegId::RearRight,
        LegId::FrontRight,
        LegId::RearLeft,
    ];

    /// 获取腿索引（0-3）
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// 从索引创建（范围检查）
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(LegId::FrontLeft),
            1 => Some(LegId::FrontRight),
            2 => Some(LegId::RearLeft),
            3 => Some(LegId::RearRight),
            _ => None,
        }
    }

    /// 是否为前腿
    #[inline]
    pub const fn is_front(self) -> bool {
        matches!(self, LegId::FrontLeft | LegId::FrontRight)
    }

    /// 获取腿名称
    pub const fn name(self) -> &'static str {
        match self {
            LegId::FrontLeft => "front-left",
            LegId::FrontRight => "front-right",
            LegId::RearLeft => "rear-left",
            LegId::RearRight => "rear-right",
        }
    }
}

impl fmt::Display for LegId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 腿数组
///
/// 类型安全的 4 腿容器，支持枚举索引、迭代和映射。
#[derive(Debug, Clone, PartialEq)]
pub struct LegArray<T> {
    data: [T; 4],
}

impl<T> LegArray<T> {
    /// 创建新的腿数组（顺序与 [`LegId::ALL`] 一致）
    #[inline]
    pub const fn new(data: [T; 4]) -> Self {
        LegArray { data }
    }

    /// 迭代器
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// 可变迭代器
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// 带腿号的映射转换
    pub fn map_with_leg<U, F>(self, mut f: F) -> LegArray<U>
    where
        F: FnMut(LegId, T) -> U,
    {
        let [a, b, c, d] = self.data;
        LegArray::new([
            f(LegId::FrontLeft, a),
            f(LegId::FrontRight, b),
            f(LegId::RearLeft, c),
            f(LegId::RearRight, d),
        ])
    }
}

impl<T> Index<LegId> for LegArray<T> {
    type Output = T;

    #[inline]
    fn index(&self, leg: LegId) -> &T {
        &self.data[leg.index()]
    }
}

impl<T> IndexMut<LegId> for LegArray<T> {
    #[inline]
    fn index_mut(&mut self, leg: LegId) -> &mut T {
        &mut self.data[leg.index()]
    }
}

impl<T> From<[T; 4]> for LegArray<T> {
    #[inline]
    fn from(data: [T; 4]) -> Self {
        LegArray::new(data)
    }
}

impl<'a, T> IntoIterator for &'a LegArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// 四足整机
///
/// 独占持有四条腿；所有姿态与步态脚本都只通过腿部目标点接口
/// 驱动，几何与镜像细节对本层不可见。
pub struct Quadruped<P: PwmOutput> {
    legs: LegArray<Leg<P>>,
    gait: GaitConfig,
}

impl<P: PwmOutput> Quadruped<P> {
    /// 创建整机
    pub fn new(legs: LegArray<Leg<P>>, gait: GaitConfig) -> Self {
        Self { legs, gait }
    }

    /// 按配置构造整机
    ///
    /// `make_pwm` 为每一路舵机提供 PWM 汇端（共 8 路，频率须与
    /// 配置一致）。标定与几何的构造错误在这里立即返回。
    pub fn from_config(
        config: &RobotConfig,
        mut make_pwm: impl FnMut() -> P,
    ) -> crate::config::Result<Self> {
        let frequency = config.pwm_frequency_hz;

        let mut build_leg = |leg: &LegConfig| -> crate::config::Result<Leg<P>> {
            let shoulder = Servo::new(make_pwm(), leg.shoulder.to_calibration(frequency)?)?;
            let knee = Servo::new(make_pwm(), leg.knee.to_calibration(frequency)?)?;
            Ok(Leg::new(shoulder, knee, leg.geometry()?, leg.side))
        };

        let legs = LegArray::new([
            build_leg(&config.legs.front_left)?,
            build_leg(&config.legs.front_right)?,
            build_leg(&config.legs.rear_left)?,
            build_leg(&config.legs.rear_right)?,
        ]);

        Ok(Self::new(legs, config.gait.clone()))
    }

    /// 步态参数
    #[inline]
    pub fn gait(&self) -> &GaitConfig {
        &self.gait
    }

    /// 只读访问一条腿（诊断用）
    #[inline]
    pub fn leg(&self, id: LegId) -> &Leg<P> {
        &self.legs[id]
    }

    /// 直接驱动一条腿到目标点
    ///
    /// 透传腿部接口的可达性语义：`Ok(false)` 表示目标不可达，
    /// 所有舵机不动。
    pub fn step_leg(&mut self, id: LegId, target: Point2<f64>) -> Result<bool> {
        Ok(self.legs[id].move_to(target)?)
    }

    /// 站立
    pub fn stand(&mut self) -> Result<()> {
        info!("posture: stand");
        let target = target(self.gait.stand);
        for id in LegId::ALL {
            self.move_leg_checked(id, target)?;
        }
        Ok(())
    }

    /// 坐下（后腿收拢，前腿支起）
    pub fn sit(&mut self) -> Result<()> {
        info!("posture: sit");
        let rear = target(self.gait.sit_rear);
        let front = target(self.gait.sit_front);

        for id in LegId::ALL {
            let t = if id.is_front() { front } else { rear };
            self.move_leg_checked(id, t)?;
        }
        Ok(())
    }

    /// 伸展
    pub fn stretch(&mut self) -> Result<()> {
        info!("posture: stretch");
        let target = target(self.gait.stretch);
        for id in LegId::ALL {
            self.move_leg_checked(id, target)?;
        }
        Ok(())
    }

    /// 行走循环
    ///
    /// 爬行步序：每个周期内依次迈四条腿，然后整体后扫推进。
    /// 每个步态步的边界轮询一次取消令牌，收到取消后把四条腿
    /// 收回站立姿态再返回，保证在一个完整步周期内干净退出。
    /// `max_cycles` 为 `None` 时一直走到被取消。
    ///
    /// 返回完成的完整周期数。
    pub fn walk(&mut self, token: &CancelToken, max_cycles: Option<u32>) -> Result<u32> {
        let pause = self.gait.step_interval();
        let stand = target(self.gait.stand);
        let swing = target([
            self.gait.stand[0] - self.gait.lift,
            self.gait.stride,
        ]);
        let place = target([self.gait.stand[0], self.gait.stride]);

        self.stand()?;
        spin_sleep::sleep(pause);

        let mut cycles = 0u32;
        'walking: while max_cycles.is_none_or(|max| cycles < max) {
            for id in LegId::CRAWL_ORDER {
                if token.is_cancelled() {
                    debug!("walk cancelled at step boundary");
                    break 'walking;
                }

                // 抬腿前摆，落地
                self.move_leg_checked(id, swing)?;
                spin_sleep::sleep(pause);
                self.move_leg_checked(id, place)?;
                spin_sleep::sleep(pause);

                // 支撑腿后扫，推动身体前移
                self.move_leg_checked(id, stand)?;
                spin_sleep::sleep(pause);
            }

            cycles += 1;
            debug!(cycles, "walk cycle complete");
        }

        // 退出前回到站立姿态，不把腿留在迈步中途
        self.stand()?;
        Ok(cycles)
    }

    /// 舞蹈例程
    ///
    /// 俯卧撑式起伏加左右摇摆的固定脚本，每个动作之间停顿一个
    /// 步态间隔；与行走循环一样按步轮询取消令牌，结束回到站立。
    pub fn dance(&mut self, token: &CancelToken) -> Result<()> {
        let pause = self.gait.step_interval();
        let stand = self.gait.stand;

        let bob_up = target([stand[0] - self.gait.lift, 0.0]);
        let bob_down = target([stand[0] + 0.8, 0.0]);
        let lean_fwd = target([stand[0], 0.8 * self.gait.stride]);
        let lean_back = target([stand[0], -0.8 * self.gait.stride]);

        let routine = [
            bob_up, bob_down, bob_up, bob_down, lean_fwd, lean_back, lean_fwd, lean_back,
        ];

        info!("dance routine start");
        self.stand()?;
        spin_sleep::sleep(pause);

        for pose in routine {
            if token.is_cancelled() {
                debug!("dance cancelled at step boundary");
                break;
            }
            for id in LegId::ALL {
                self.move_leg_checked(id, pose)?;
            }
            spin_sleep::sleep(pause);
        }

        self.stand()?;
        Ok(())
    }

    /// 驱动一条腿并把"不可达"升级为姿态脚本错误
    fn move_leg_checked(&mut self, id: LegId, target: Point2<f64>) -> Result<()> {
        if self.legs[id].move_to(target)? {
            Ok(())
        } else {
            Err(GaitError::UnreachablePosture {
                leg: id,
                x: target.x,
                y: target.y,
            })
        }
    }
}

#[inline]
fn target(xy: [f64; 2]) -> Point2<f64> {
    Point2::new(xy[0], xy[1])
}
