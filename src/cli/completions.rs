use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    querypack completions bash > ~/.bash_completion.d/querypack\n\n\
                  Generate zsh completions:\n    querypack completions zsh > ~/.zfunc/_querypack\n\n\
                  Generate fish completions:\n    querypack completions fish > ~/.config/fish/completions/querypack.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
