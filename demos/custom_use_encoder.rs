use std::path::Path;

use canonopts::{
    CompilerHandle, ModuleOptions, ModuleRule, RawModuleRuleUse, RuleUse, TranslateError,
    UseChainContext, UseChainEncoder, UseItem, compile_module, regexp,
};

/// Resolves every loader name against a fixed loader directory and refuses
/// inline request chains.
struct PrefixingEncoder {
    loader_dir: &'static str,
}

impl UseChainEncoder for PrefixingEncoder {
    fn encode_use(
        &self,
        uses: &RuleUse,
        ctx: &UseChainContext<'_>,
    ) -> Result<Vec<RawModuleRuleUse>, TranslateError> {
        uses.items()
            .iter()
            .map(|item| match item {
                UseItem::Loader { loader, options } => Ok(RawModuleRuleUse {
                    loader: format!("{}/{}/{loader}", ctx.context.display(), self.loader_dir),
                    options: options.as_ref().map(ToString::to_string),
                }),
                UseItem::Request(request) => Err(TranslateError::UseChain(
                    format!("inline request '{request}' is not allowed").into(),
                )),
            })
            .collect()
    }
}

fn main() {
    let module = ModuleOptions {
        default_rules: Some(Vec::new()),
        rules: vec![ModuleRule::new().test(regexp(r"\.md$")).uses(
            RuleUse::new().loader("markdown-loader", Some(serde_json::json!({ "gfm": true }))),
        )],
        parser: None,
    };

    let compiler = CompilerHandle::new("docs");
    let ctx = UseChainContext {
        compiler: &compiler,
        devtool: "",
        context: Path::new("/project"),
    };
    let encoder = PrefixingEncoder {
        loader_dir: "loaders",
    };

    let compiled = compile_module(&module, &encoder, &ctx).expect("failed to compile module");
    for rule in &compiled.rules {
        for loader in &rule.uses {
            println!("{} {:?}", loader.loader, loader.options);
        }
    }

    let rejected = ModuleOptions {
        rules: vec![ModuleRule::new().uses("raw-loader")],
        ..module
    };
    match compile_module(&rejected, &encoder, &ctx) {
        Ok(_) => println!("unexpectedly accepted"),
        Err(e) => println!("rejected: {e}"),
    }
}
