use canonopts::{
    CacheSetting, CompilerHandle, Devtool, EntryDescription, ExperimentsOptions, ModuleOptions,
    ModuleRule, NodeOptions, NormalizedOptions, OptimizationOptions, OutputOptions, RuleUse,
    SnapshotOptions, SnapshotStrategy, Target, Translator, any_of, regexp, text,
};
use indexmap::IndexMap;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Options as the defaulting stage would leave them
    let mut entry = IndexMap::new();
    entry.insert(
        "main".to_owned(),
        EntryDescription {
            import: Some(vec!["./src/index.js".to_owned()]),
            runtime: None,
        },
    );
    let strategy = SnapshotStrategy {
        timestamp: Some(true),
        hash: Some(false),
    };

    let options = NormalizedOptions {
        context: Some("/project".into()),
        entry: Some(entry),
        target: Some(Target::One("web".into())),
        output: Some(OutputOptions {
            path: Some("/project/dist".into()),
            public_path: Some("auto".into()),
            asset_module_filename: Some("[hash][ext][query]".into()),
            filename: Some("[name].js".into()),
            chunk_filename: Some("[id].js".into()),
            css_filename: Some("[name].css".into()),
            css_chunk_filename: Some("[id].css".into()),
            unique_name: Some("demo".into()),
            strict_module_error_handling: Some(false),
            library: None,
        }),
        module: Some(ModuleOptions {
            default_rules: Some(vec![ModuleRule::new().test(regexp(r"\.json$")).module_type("json")]),
            rules: vec![
                ModuleRule::new()
                    .test(regexp(r"\.jsx?$"))
                    .exclude(!any_of([text("src"), text("lib")]))
                    .uses(RuleUse::new().request("babel-loader")),
            ],
            parser: None,
        }),
        devtool: Some(Devtool::Off),
        optimization: Some(OptimizationOptions {
            module_ids: Some("named".into()),
            remove_available_modules: Some(false),
            side_effects: Some("flag".into()),
            split_chunks: None,
        }),
        snapshot: Some(SnapshotOptions {
            resolve: Some(strategy.clone()),
            module: Some(strategy),
        }),
        cache: Some(CacheSetting::Flag(true)),
        experiments: Some(ExperimentsOptions {
            lazy_compilation: Some(false),
            incremental_rebuild: Some(false),
        }),
        node: Some(NodeOptions {
            dirname: Some("mock".into()),
        }),
        ..NormalizedOptions::default()
    };

    let compiler = CompilerHandle::new("demo");
    let canonical = Translator::new(&compiler)
        .translate(&options)
        .expect("failed to translate options");

    println!(
        "{}",
        serde_json::to_string_pretty(&canonical).expect("failed to render options")
    );
}
