use std::process::ExitCode;
use rproxy_entrypoints::entrypoints::{validate_all, EntryPoints};
use rproxy_entrypoints::logging::init_logging;
use rproxy_entrypoints::settings::Settings;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let settings = match Settings::load().await {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("설정 로드 실패: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let _guard = match init_logging(&settings.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("로깅 초기화 실패: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // 명령행 인자로 받은 표현식이 있으면 설정보다 우선
    let args: Vec<String> = std::env::args().skip(1).collect();
    let expressions = if args.is_empty() { settings.entry_points } else { args };

    let (entry_points, errors) = EntryPoints::from_expressions(&expressions);
    for e in &errors {
        error!(error = %e, "엔트리포인트 설정 오류");
    }

    let issues = validate_all(&entry_points);
    info!(
        entry_points = entry_points.len(),
        failed = errors.len(),
        issues = issues.len(),
        "엔트리포인트 컴파일 완료"
    );

    match serde_json::to_string_pretty(&entry_points) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            error!(error = %e, "JSON 직렬화 실패");
            return ExitCode::FAILURE;
        }
    }

    if errors.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
