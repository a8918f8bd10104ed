// Leditor - Lingo level data toolkit
//
// Copyright (c) 2025 Leditor contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Shell completion scripts.

use clap::Command;
use clap_complete::{generate, Generator};
use std::io;

/// Writes the completion script for `cmd` to stdout.
pub fn generate_completion_for_command<G: Generator>(generator: G, cmd: &mut Command) {
    let name = cmd.get_name().to_string();
    generate(generator, cmd, name, &mut io::stdout());
}

/// Shell-specific instructions for installing the completion script.
/// Shell names are case-insensitive.
pub fn installation_instructions(shell: &str) -> String {
    match shell.to_lowercase().as_str() {
        "bash" => {
            r#"# Bash completion installation:

# For current session only:
eval "$(leditor completion bash)"

# For persistent installation, add to your ~/.bashrc:
echo 'eval "$(leditor completion bash)"' >> ~/.bashrc
"#
        }
        "zsh" => {
            r#"# Zsh completion installation:

# For current session only:
eval "$(leditor completion zsh)"

# Or save to a directory in $fpath:
leditor completion zsh > ~/.zsh/completions/_leditor
"#
        }
        "fish" => {
            r#"# Fish completion installation:

leditor completion fish > ~/.config/fish/completions/leditor.fish
"#
        }
        "powershell" | "pwsh" => {
            r#"# PowerShell completion installation:

# Add this line to your profile ($PROFILE):
leditor completion powershell | Out-String | Invoke-Expression
"#
        }
        "elvish" => {
            r#"# Elvish completion installation:

# Add this line to ~/.elvish/rc.elv:
eval (leditor completion elvish)
"#
        }
        _ => "Unsupported shell",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instructions_name_the_binary() {
        for shell in ["bash", "zsh", "fish", "powershell", "elvish"] {
            assert!(installation_instructions(shell).contains("leditor completion"), "{}", shell);
        }
    }

    #[test]
    fn test_instructions_case_insensitive() {
        assert_eq!(installation_instructions("BASH"), installation_instructions("bash"));
        assert_eq!(installation_instructions("pwsh"), installation_instructions("powershell"));
    }

    #[test]
    fn test_unknown_shell() {
        assert_eq!(installation_instructions("tcsh"), "Unsupported shell");
    }
}
