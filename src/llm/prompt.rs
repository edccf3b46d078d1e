//! Prompt construction for commit messages and pull request descriptions.

use crate::git::BranchInfo;

/// Character budget for the diff embedded in a commit message prompt.
pub const COMMIT_DIFF_LIMIT: usize = 250;

/// Character budget for the diff embedded in a pull request description prompt.
pub const PR_DIFF_LIMIT: usize = 8000;

/// Appended to a diff that was cut at its character budget.
pub const TRUNCATION_SENTINEL: &str = "\nand some other things.";

const IGNORE_COSMETIC: &str = "Ignore hunks that only change formatting, whitespace, import order, or comments; describe behavior changes only.";

/// Cut `diff` to at most `limit` characters, marking the cut.
///
/// A string that already carries the sentinel and whose visible prefix fits
/// the limit is returned as is, so truncating twice never stacks markers.
pub fn truncate_diff(diff: &str, limit: usize) -> String {
    if let Some(prefix) = diff.strip_suffix(TRUNCATION_SENTINEL)
        && prefix.chars().count() <= limit
    {
        return diff.to_string();
    }

    match diff.char_indices().nth(limit) {
        None => diff.to_string(),
        Some((cut, _)) => {
            let mut truncated = String::with_capacity(cut + TRUNCATION_SENTINEL.len());
            truncated.push_str(&diff[..cut]);
            truncated.push_str(TRUNCATION_SENTINEL);
            truncated
        }
    }
}

/// Build the prompt for a single-line conventional commit message.
pub fn build_commit_prompt(diff: &str, branch: &BranchInfo, instructions: Option<&str>) -> String {
    let truncated = truncate_diff(diff, COMMIT_DIFF_LIMIT);
    let shape = subject_shape(branch);
    let extra = instructions_section(instructions);

    format!(
        r#"You are writing a Git commit message that follows the Conventional Commits guidelines.

## Diff
{truncated}

## Rules
- Format: {shape}
- Type: one of feat, fix, build, chore, ci, docs, style, refactor, perf, test
- Description: imperative mood, lowercase after the colon, no period at the end
- One line only. Describe the purpose of the change, suitable for project history.
- {IGNORE_COSMETIC}{extra}

## Output
Respond with ONLY the commit message line. No preamble, no quotes, no markdown."#
    )
}

/// Build the prompt for a pull request description.
///
/// The description is generated first; the title prompt is built from it.
pub fn build_description_prompt(diff: &str, instructions: Option<&str>) -> String {
    let truncated = truncate_diff(diff, PR_DIFF_LIMIT);
    let extra = instructions_section(instructions);

    format!(
        r#"You are writing the description of a pull request.

## Diff of every change on the branch
{truncated}

## Rules
- Be concise and to the point.
- Write for readers who are not technical: explain what changes for users and why.
- Use a short markdown bullet list when the pull request contains several changes.
- {IGNORE_COSMETIC}{extra}

## Output
Respond with ONLY the description. No preamble, no title, no code fences."#
    )
}

/// Build the prompt for a pull request title from its finished description.
pub fn build_title_prompt(
    description: &str,
    branch: &BranchInfo,
    instructions: Option<&str>,
) -> String {
    let shape = subject_shape(branch);
    let extra = instructions_section(instructions);

    format!(
        r#"You are writing the title of a pull request.

## Pull request description
{description}

## Rules
- Format: {shape}
- Summarize the description in one concise, clear line.{extra}

## Output
Respond with ONLY the title. No preamble, no quotes, no markdown."#
    )
}

/// Required subject shape, pinned to the branch's type and ticket when known.
fn subject_shape(branch: &BranchInfo) -> String {
    if branch.is_detected() {
        format!(
            "`{}({}): <description>` (use exactly this type and scope)",
            branch.change_type, branch.ticket_id
        )
    } else {
        "`<type>(<scope>): <description>` (scope optional, inferred from the main area changed)"
            .to_string()
    }
}

fn instructions_section(instructions: Option<&str>) -> String {
    match instructions.map(str::trim) {
        Some(text) if !text.is_empty() => format!("\n- Additional instructions: {text}"),
        _ => String::new(),
    }
}
