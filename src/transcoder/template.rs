//! Built-in dump workflow template
//!
//! The `Generate Dump` step writes every `scdmp_`-prefixed environment
//! variable to `secrets_dump/<NAME>.txt`, and the final step uploads that
//! directory as a short-lived artifact. The injector fills the step's `env`
//! mapping and drops the `PLACEHOLDER` entry.

/// Baseline workflow used when no `--template` override is given
pub const DUMP_WORKFLOW_TEMPLATE: &str = r#"name: "Dump Secrets"

on:
  workflow_dispatch:

jobs:
  run:
    name: "Dump Secrets"
    runs-on: ubuntu-latest

    steps:
      - name: "Check out repository"
        uses: actions/checkout@v3

      - uses: ruby/setup-ruby@v1
        with:
          ruby-version: 3.2.0
          bundler-cache: true

      - name: "Generate Dump"
        shell: ruby {0}
        env:
          PLACEHOLDER: ""
        run: |
          Dir.mkdir('secrets_dump')

          ENV.each do |k,v|
              next unless k.start_with?('scdmp_')
              secret_value = ENV[k]
              secret_name = k.sub("scdmp_", "")

              File.open("secrets_dump/#{secret_name}.txt", "w") do |f|
                  f.write secret_value
                  f.close
              end
          end
      - uses: actions/upload-artifact@v3
        with:
          name: secrets-dump
          path: secrets_dump/
          retention-days: 1
"#;
