use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ifacescan_core::{scan_with_stats, MatchPattern, ScanOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

/// 命令行入口（基于 clap）
#[derive(Parser, Debug)]
#[command(name = "ifacescan", version, about = "List interface declarations in a single source directory")]
struct Cli {
    /// 待扫描目录（不递归）
    #[arg(long, default_value = ".")]
    path: PathBuf,

    /// 配置文件路径（TOML，字段：pattern / extension）
    #[arg(long)]
    config: Option<PathBuf>,

    /// 自定义匹配模式（覆盖配置文件；第 1 个捕获组为声明名）
    #[arg(long)]
    pattern: Option<String>,

    /// 源文件扩展名（覆盖配置文件）
    #[arg(long)]
    extension: Option<String>,

    /// 输出格式
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// 以单个空格连接，无换行
    Text,
    /// JSON 数组
    Json,
}

fn main() -> Result<()> {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug）
    init_tracing();
    let cli = Cli::parse();

    let mut out = io::stdout().lock();
    run(&cli, &mut out)?;
    out.flush().context("flush stdout")?;
    Ok(())
}

/// 执行一次扫描并写出结果；失败时不写任何输出
fn run(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    let opts = build_options(cli)?;
    info!(path = ?cli.path, pattern = opts.pattern.as_str(), extension = %opts.extension, "starting scan");

    let (names, stats) = scan_with_stats(&cli.path, &opts).context("Error finding interfaces")?;
    info!(
        files_scanned = stats.files_scanned,
        entries_skipped = stats.entries_skipped,
        names_found = stats.names_found,
        "scan finished"
    );

    write_names(out, &names, cli.format)
}

/// 组装扫描参数：配置文件 → 命令行覆盖
fn build_options(cli: &Cli) -> Result<ScanOptions> {
    let mut opts = match &cli.config {
        Some(path) => ScanOptions::from_config_file(path).context("load config")?,
        None => ScanOptions::default(),
    };
    if let Some(p) = &cli.pattern {
        opts = opts.with_pattern(MatchPattern::new(p).context("compile --pattern")?);
    }
    if let Some(ext) = &cli.extension {
        opts = opts.with_extension(ext);
    }
    Ok(opts)
}

fn write_names(out: &mut dyn Write, names: &[String], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => write!(out, "{}", names.join(" "))?,
        OutputFormat::Json => serde_json::to_writer(&mut *out, names)?,
    }
    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 日志写到 stderr，stdout 只保留扫描结果；默认 warn
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    fn render(names: &[&str], format: OutputFormat) -> String {
        let names: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        let mut buf = Vec::new();
        write_names(&mut buf, &names, format).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn text_output_is_space_joined_without_newline() {
        assert_eq!(render(&["Reader", "Writer"], OutputFormat::Text), "Reader Writer");
        assert_eq!(render(&[], OutputFormat::Text), "");
    }

    #[test]
    fn json_output_is_array() {
        assert_eq!(render(&["Reader"], OutputFormat::Json), r#"["Reader"]"#);
    }

    #[test]
    fn path_defaults_to_current_directory() {
        let cli = Cli::try_parse_from(["ifacescan"]).unwrap();
        assert_eq!(cli.path, PathBuf::from("."));
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from(["ifacescan", "--pattern", r"trait\s+(\w+)", "--extension", "rs"]).unwrap();
        let opts = build_options(&cli).unwrap();
        assert_eq!(opts.extension, "rs");
        assert_eq!(opts.pattern.extract(b"trait Store {"), vec!["Store"]);
    }

    #[test]
    fn missing_directory_reports_error_chain() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let cli = Cli::try_parse_from([OsStr::new("ifacescan"), OsStr::new("--path"), missing.as_os_str()]).unwrap();
        let mut buf = Vec::new();
        let err = run(&cli, &mut buf).unwrap_err();
        let chain = format!("{err:#}");
        assert!(chain.contains("Error finding interfaces"), "{chain}");
        assert!(chain.contains("failed to walk directory"), "{chain}");
        assert!(buf.is_empty());
    }

    #[test]
    fn run_writes_names_for_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("io.go"), "type Reader interface {\n}\ntype Writer interface {\n}\n").unwrap();
        let cli = Cli::try_parse_from([OsStr::new("ifacescan"), OsStr::new("--path"), dir.path().as_os_str()]).unwrap();
        let mut buf = Vec::new();
        run(&cli, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Reader Writer");
    }

    #[test]
    fn pattern_without_group_is_rejected() {
        let cli = Cli::try_parse_from(["ifacescan", "--pattern", "interface"]).unwrap();
        assert!(build_options(&cli).is_err());
    }
}
