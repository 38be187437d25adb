use anyhow::Result;
use inquire::Editor;

/// Prompts the user for the task description to analyze
pub fn prompt_input_text() -> Result<String> {
    // Use the Editor type for multiline input
    let text = Editor::new("Task description:")
        .with_help_message("Describe the task or feature request; end sentences with . ! or ?")
        .prompt()?;
    Ok(text)
}
