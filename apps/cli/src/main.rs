//! # Pup CLI
//!
//! 四足机器人的命令行控制面。每个子命令都是 one-shot 模式：
//! 加载配置 → 构造整机 → 执行动作 → 退出。
//!
//! ```bash
//! # 站立 / 坐下 / 伸展
//! pup-cli stand
//! pup-cli sit
//!
//! # 行走（Ctrl-C 经取消令牌干净停止）
//! pup-cli walk --cycles 4
//!
//! # 单腿指点
//! pup-cli set-leg front-left -x 11 -y 0
//!
//! # 逆解调试
//! pup-cli solve -x 11 -y 0
//! ```
//!
//! 当前构建面向无硬件演示：所有 PWM 汇端都是记录型 Mock，
//! 真实板卡后端由板级支持包替换。

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{DistanceCommand, SetLegCommand, SolveCommand, WalkCommand};

/// Pup CLI - 四足机器人命令行工具
#[derive(Parser, Debug)]
#[command(name = "pup-cli")]
#[command(about = "Command-line control surface for Pup quadruped robots", long_about = None)]
#[command(version)]
struct Cli {
    /// 机器人配置文件（TOML），缺省使用参考硬件配置
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 站立
    Stand,

    /// 坐下
    Sit,

    /// 伸展
    Stretch,

    /// 行走循环（Ctrl-C 停止）
    Walk {
        #[command(flatten)]
        args: WalkCommand,
    },

    /// 舞蹈例程
    Dance,

    /// 驱动单条腿到目标点
    SetLeg {
        #[command(flatten)]
        args: SetLegCommand,
    },

    /// 读取障碍物距离估计
    Distance {
        #[command(flatten)]
        args: DistanceCommand,
    },

    /// 逆解调试：打印目标点的关节角解
    Solve {
        #[command(flatten)]
        args: SolveCommand,
    },
}

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pup_gait=info".parse().unwrap())
                .add_directive("pup_cli=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Stand => commands::stand(&config),
        Commands::Sit => commands::sit(&config),
        Commands::Stretch => commands::stretch(&config),
        Commands::Walk { args } => args.execute(&config),
        Commands::Dance => commands::dance(&config),
        Commands::SetLeg { args } => args.execute(&config),
        Commands::Distance { args } => args.execute(),
        Commands::Solve { args } => args.execute(),
    }
}
