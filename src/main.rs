use std::path::PathBuf;
use std::process::ExitCode;

use biogas_savings::{
    app::{self, AppError, ComputeOptions},
    config, conversion, i18n, logging,
    units::{EnergyUnit, MassUnit, VolumeUnit},
};
use clap::{ArgAction, Args, Parser, Subcommand};

/// 숯 대신 바이오가스를 쓸 때의 에너지/비용 절감량 계산기.
#[derive(Parser)]
#[command(name = "biogas_savings_cli", version)]
struct Cli {
    /// 설정 파일 경로
    #[arg(long, global = true, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// 언어 (auto/en/ko)
    #[arg(long, short = 'L', global = true)]
    lang: Option<String>,

    /// 로그 상세도 (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// 명령이 없으면 대화형 메뉴를 연다.
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// 하루 숯 사용량 하나로 절감량을 계산한다.
    Compute(ComputeArgs),
}

#[derive(Args)]
struct ComputeArgs {
    /// 하루 숯 사용량
    #[arg(allow_hyphen_values = true)]
    quantity: String,

    /// 숯 단가 [통화/kg]
    #[arg(long)]
    cost_per_kg: Option<f64>,

    /// 숯 화로 효율 (0~1)
    #[arg(long)]
    eff_charcoal: Option<f64>,

    /// 바이오가스 버너 효율 (0~1)
    #[arg(long)]
    eff_biogas: Option<f64>,

    /// 사용량 입력 단위 (kg, g, lb)
    #[arg(long, value_parser = conversion::parse_mass_unit)]
    mass_unit: Option<MassUnit>,

    /// 에너지 표시 단위 (MJ, kJ, kWh, kcal, Btu)
    #[arg(long, value_parser = conversion::parse_energy_unit)]
    energy_unit: Option<EnergyUnit>,

    /// 체적 표시 단위 (m3, L, ft3)
    #[arg(long, value_parser = conversion::parse_volume_unit)]
    volume_unit: Option<VolumeUnit>,

    /// JSON으로 출력
    #[arg(long)]
    json: bool,

    /// 해설 문장을 함께 출력
    #[arg(long)]
    explain: bool,
}

impl From<ComputeArgs> for ComputeOptions {
    fn from(args: ComputeArgs) -> Self {
        Self {
            quantity: args.quantity,
            charcoal_cost_per_kg: args.cost_per_kg,
            eff_charcoal: args.eff_charcoal,
            eff_biogas: args.eff_biogas,
            mass_unit: args.mass_unit,
            energy_unit: args.energy_unit,
            volume_unit: args.volume_unit,
            json: args.json,
            explain: args.explain,
        }
    }
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 명령 또는 대화형 메뉴를 실행한다.
fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let mut cfg = match config::load_or_default(&cli.config) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    let lang = i18n::resolve_language(cli.lang.as_deref(), Some(cfg.language.as_str()));
    let tr = i18n::Translator::new(&lang);

    match try_run(cli.command, &mut cfg, &tr) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}: {err}", tr.t(i18n::keys::ERROR_PREFIX));
            ExitCode::FAILURE
        }
    }
}

fn try_run(
    command: Option<Command>,
    cfg: &mut config::Config,
    tr: &i18n::Translator,
) -> Result<(), AppError> {
    match command {
        Some(Command::Compute(args)) => app::run_compute(cfg, tr, &args.into()),
        None => app::run(cfg, tr),
    }
}
