use crate::*;

pub fn handle_admin_commands(cli: &Cli) -> anyhow::Result<bool> {
    let Commands::Hashlist {
        folder,
        output,
        algorithm,
    } = &cli.command
    else {
        return Ok(false);
    };

    let entries = hash_folder(folder, algorithm)?;
    write_hash_list(&entries, output)?;
    tracing::info!(
        files = entries.len(),
        output = %output.display(),
        "hash list written"
    );
    print_out(cli.json, &entries, |e| format!("{}\t{}", e.file_name, e.hash))?;

    Ok(true)
}
