use shared_types::*;
use std::fs;
use std::path::Path;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate TypeScript definitions for API types
    let mut types = Vec::new();

    // Folder types
    types.push(clean_type(Folder::export_to_string()?));
    types.push(clean_type(FolderSelector::export_to_string()?));
    types.push(clean_type(FolderInfo::export_to_string()?));
    types.push(clean_type(ListFoldersResponse::export_to_string()?));

    // Email types
    types.push(clean_type(ApiSender::export_to_string()?));
    types.push(clean_type(ApiEmail::export_to_string()?));
    types.push(clean_type(ApiThread::export_to_string()?));
    types.push(clean_type(ListEmailsRequest::export_to_string()?));
    types.push(clean_type(ListEmailsResponse::export_to_string()?));
    types.push(clean_type(ListThreadsRequest::export_to_string()?));
    types.push(clean_type(ListThreadsResponse::export_to_string()?));

    // Mutation requests
    types.push(clean_type(MoveEmailRequest::export_to_string()?));
    types.push(clean_type(ToggleStarRequest::export_to_string()?));
    types.push(clean_type(MarkAsReadRequest::export_to_string()?));

    // User types
    types.push(clean_type(AccountOwner::export_to_string()?));
    types.push(clean_type(MailSettings::export_to_string()?));
    types.push(clean_type(ApiUser::export_to_string()?));
    types.push(clean_type(ErrorResponse::export_to_string()?));

    let output_dir = Path::new("../web/src/api-types");
    fs::create_dir_all(output_dir)?;

    let output_path = output_dir.join("types.ts");
    let output = types.join("\n\n");

    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

/// Drops the per-type banner and the imports between types that end up in the same file
fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    let filtered: Vec<&str> = type_def
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
                && !trimmed.starts_with("/* This file was generated")
        })
        .collect();

    let result = filtered.join("\n").trim().to_string();
    if result.is_empty() {
        result
    } else {
        format!("{}\n", result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_type_strips_banner_and_imports() {
        let raw = "// This file was generated by ts-rs\r\nimport type { Folder } from \"./Folder\";\n\nexport type X = { folder: Folder };\n";
        assert_eq!(clean_type(raw.to_string()), "export type X = { folder: Folder };\n");
    }
}
