use crate::*;
use anyhow::Context;

pub fn handle_runtime_commands(cli: &Cli, settings: &Settings) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::Run(args) => {
            let settings = settings.clone().with_run_overrides(args);
            let summary = run_batch(&settings)?;
            print_summary(cli.json, &summary)?;
        }
        Commands::Render {
            raw,
            output,
            template_dir,
            template,
        } => {
            let dir = template_dir.as_ref().unwrap_or(&settings.template_dir);
            let name = template.as_deref().unwrap_or(&settings.template);
            let renderer = ReportRenderer::from_dir(dir, name)?;

            let text = std::fs::read_to_string(raw)
                .with_context(|| format!("reading {}", raw.display()))?;
            let record: VerdictRecord = serde_json::from_str(&text)
                .with_context(|| format!("{} is not a saved verdict record", raw.display()))?;
            let report = renderer.render(&record)?;

            match output {
                Some(out) => {
                    std::fs::write(out, &report)
                        .with_context(|| format!("writing {}", out.display()))?;
                    let done = RenderReport {
                        source: raw.display().to_string(),
                        output: Some(out.display().to_string()),
                    };
                    print_one(cli.json, done, |r| {
                        format!(
                            "rendered {} -> {}",
                            r.source,
                            r.output.as_deref().unwrap_or_default()
                        )
                    })?;
                }
                None if cli.json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&JsonOut {
                            ok: true,
                            data: serde_json::json!({
                                "source": raw.display().to_string(),
                                "report": report
                            })
                        })?
                    );
                }
                None => print!("{}", report),
            }
        }
        Commands::Hashlist { .. } => return Ok(false),
    }
    Ok(true)
}
