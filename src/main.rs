use std::path::PathBuf;

use clap::Parser;
use solar_sizing_toolbox::app::{self, AppContext, Session};
use solar_sizing_toolbox::report::{self, ReportFormat};
use solar_sizing_toolbox::{config, i18n, input, ui_cli};
use tracing_subscriber::EnvFilter;

/// 월별 소비량과 일사량으로 태양광 설비 용량과 회수기간을 계산한다.
#[derive(Parser, Debug)]
#[command(name = "solar_sizing_toolbox", version, about)]
struct Cli {
    /// 언어 (auto/ko/en-us/pt-br)
    #[arg(long = "lang", short = 'L', default_value = "auto")]
    lang: String,
    /// 설정 파일 경로
    #[arg(long, default_value = config::CONFIG_FILE)]
    config: PathBuf,
    /// 시작 시 월별 소비량을 불러올 CSV
    #[arg(long)]
    csv: Option<PathBuf>,
    /// 대화형 메뉴 없이 계산 후 보고서만 저장한다 (.toml 확장자면 TOML)
    #[arg(long)]
    report: Option<PathBuf>,
    /// 비대화형 실행에서 회수기간을 함께 계산할 총 투자비 (`--report`와 함께만 사용)
    #[arg(long, requires = "report")]
    investment: Option<f64>,
    /// 로그 필터 (RUST_LOG가 있으면 그쪽이 우선)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = try_run(cli) {
        tracing::error!(error = %err, "fatal");
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn try_run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::load_or_default_at(&cli.config)?;
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let mut ctx = AppContext::new(cfg, cli.config.clone(), &lang);
    let mut session = Session::from_config(&ctx.config);

    if let Some(path) = &cli.csv {
        let outcome = input::import_consumption(path)?;
        ui_cli::apply_import(&ctx.tr, &mut session, outcome);
    }

    match &cli.report {
        Some(path) => {
            if let Some(investment) = cli.investment {
                session.payback_enabled = true;
                session.investment = investment;
            }
            let format = match path.extension().and_then(|e| e.to_str()) {
                Some("toml") => ReportFormat::Toml,
                _ => ReportFormat::Text,
            };
            let analysis = session.calculate()?;
            println!("{}", ui_cli::summary_line(analysis));
            report::save_report(analysis, path, format, &ctx.tr, ctx.display_units())?;
        }
        None => app::run(&mut ctx, &mut session)?,
    }
    Ok(())
}
