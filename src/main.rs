// ==========================================
// 数据中心成本估算 - 命令行入口 (App Shell)
// ==========================================
// 用法:
//   datacenter-cost --name "Denver" --capacity 20MW --rating "Tier IV" --inflation 0.03
//                   [--start-year 2025] [--config config.json] [--data-dir ./data]
// 输出: stdout 为 CostReport JSON; 日志走 stderr
// 退出码: 0 成功 / 1 配置或内部错误 / 2 输入错误
// ==========================================

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Datelike;
use tracing::{error, info, warn};

use datacenter_cost::api::{ApiError, ProjectForm};
use datacenter_cost::app::AppState;
use datacenter_cost::config::ConfigManager;
use datacenter_cost::logging;

const USAGE: &str = "用法: datacenter-cost [--name <text>] [--capacity <5MW|20MW|100MW>] \
[--rating <\"Tier III\"|\"Tier IV\">] [--inflation <decimal>] [--start-year <yyyy>] \
[--config <path>] [--data-dir <path>]";

/// 命令行参数
#[derive(Debug, Default)]
struct CliArgs {
    form: ProjectForm,
    config: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    help: bool,
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<CliArgs, ApiError> {
    let mut cli = CliArgs::default();

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((f, v)) if f.starts_with("--") => (f.to_string(), Some(v.to_string())),
            _ => (arg.clone(), None),
        };

        if flag == "--help" || flag == "-h" {
            cli.help = true;
            continue;
        }

        let value = match inline.or_else(|| args.next()) {
            Some(v) => v,
            None => {
                return Err(ApiError::ValidationError(format!("参数缺少取值: {}", flag)));
            }
        };

        match flag.as_str() {
            "--name" => cli.form.name = Some(value),
            "--capacity" => cli.form.capacity = Some(value),
            "--rating" => cli.form.rating = Some(value),
            "--inflation" => cli.form.inflation = Some(value),
            "--start-year" => cli.form.start_year = Some(value),
            "--config" => cli.config = Some(PathBuf::from(value)),
            "--data-dir" => cli.data_dir = Some(PathBuf::from(value)),
            other => {
                return Err(ApiError::ValidationError(format!("未知参数: {}", other)));
            }
        }
    }

    Ok(cli)
}

fn run(cli: CliArgs) -> Result<String, ApiError> {
    let mut config = ConfigManager::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }

    let state = AppState::initialize(config)?;

    let current_year = chrono::Local::now().year();
    let input = state.validator.validate(&cli.form, current_year)?;

    let report = state.estimator_api.compute_datacenter_costs(&input)?;
    serde_json::to_string_pretty(&report)
        .map_err(|e| ApiError::InternalError(format!("结果序列化失败: {}", e)))
}

fn main() -> ExitCode {
    logging::init();

    info!("数据中心成本估算 v{}", datacenter_cost::VERSION);

    let cli = match parse_args(std::env::args().skip(1)) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };

    if cli.help {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    match run(cli) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) if e.is_user_facing() => {
            warn!(error = %e, "输入被拒绝");
            eprintln!("{}", e);
            ExitCode::from(2)
        }
        Err(e) => {
            error!(error = %e, "估算失败");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> std::vec::IntoIter<String> {
        list.iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_parse_args() {
        let cli = parse_args(args(&[
            "--name",
            "Denver",
            "--capacity=20MW",
            "--rating",
            "Tier IV",
            "--data-dir",
            "/tmp/rates",
        ]))
        .unwrap();

        assert_eq!(cli.form.name.as_deref(), Some("Denver"));
        assert_eq!(cli.form.capacity.as_deref(), Some("20MW"));
        assert_eq!(cli.form.rating.as_deref(), Some("Tier IV"));
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/rates")));
        assert!(cli.form.inflation.is_none());
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(args(&["--capacity"])).is_err());
        assert!(parse_args(args(&["--colour", "blue"])).is_err());
        assert!(parse_args(args(&["--help"])).unwrap().help);
    }
}
