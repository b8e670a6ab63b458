use canonopts::{CanonError, CompilerHandle, NormalizedOptions, Translator, translate_json};
use serde_json::{Value, json};

const FIXTURE: &str = include_str!("fixtures/webapp.json");

fn fixture_path() -> String {
    format!("{}/tests/fixtures/webapp.json", env!("CARGO_MANIFEST_DIR"))
}

fn translate_fixture() -> Value {
    let compiler = CompilerHandle::new("webapp");
    let canonical = translate_json(FIXTURE, &compiler).unwrap();
    serde_json::to_value(canonical).unwrap()
}

#[test]
fn module_rules_fully_encoded() {
    let wire = translate_fixture();
    assert_eq!(
        wire["module"],
        json!({
            "rules": [
                {
                    "test": { "type": "regexp", "regexpMatcher": "\\.json$" },
                    "use": [],
                    "type": "json"
                },
                {
                    "test": { "type": "regexp", "regexpMatcher": "\\.mjs$" },
                    "use": [],
                    "resolve": { "fullySpecified": true }
                },
                {
                    "test": { "type": "regexp", "regexpMatcher": "\\.tsx?$" },
                    "exclude": {
                        "type": "array",
                        "arrayMatcher": [
                            { "type": "regexp", "regexpMatcher": "[\\\\/]node_modules[\\\\/]" }
                        ]
                    },
                    "use": [{
                        "loader": "builtin:swc-loader",
                        "options": "{\"jsc\":{\"parser\":{\"syntax\":\"typescript\"}},\"sourceMap\":true}"
                    }]
                },
                {
                    "test": { "type": "regexp", "regexpMatcher": "\\.css$" },
                    "use": [],
                    "oneOf": [
                        {
                            "resourceQuery": { "type": "string", "stringMatcher": "inline" },
                            "use": [],
                            "type": "asset/source"
                        },
                        {
                            "issuer": {
                                "type": "logical",
                                "logicalMatcher": [{
                                    "not": { "type": "regexp", "regexpMatcher": "\\.css$" }
                                }]
                            },
                            "use": [
                                { "loader": "style-loader" },
                                { "loader": "css-loader", "options": "modules" }
                            ]
                        }
                    ]
                },
                {
                    "resource": {
                        "type": "logical",
                        "logicalMatcher": [{
                            "and": [
                                { "type": "string", "stringMatcher": "/srv/webapp/src" },
                                {
                                    "type": "logical",
                                    "logicalMatcher": [{
                                        "or": [
                                            { "type": "regexp", "regexpMatcher": "\\.png$" },
                                            { "type": "regexp", "regexpMatcher": "\\.svg$" }
                                        ]
                                    }]
                                }
                            ]
                        }]
                    },
                    "use": [],
                    "type": "asset",
                    "sideEffects": false
                }
            ],
            "parser": { "javascript": { "exprContextCritical": false } }
        })
    );
}

#[test]
fn optimization_section() {
    let wire = translate_fixture();
    assert_eq!(
        wire["optimization"],
        json!({
            "splitChunks": {
                "cacheGroups": {
                    "vendors": {
                        "test": "[\\\\/]node_modules[\\\\/]",
                        "name": "vendors",
                        "priority": -10,
                        "minChunks": null,
                        "chunks": "initial"
                    },
                    "default": {
                        "test": null,
                        "name": null,
                        "priority": -20,
                        "minChunks": 2,
                        "chunks": null
                    }
                },
                "chunks": "all"
            },
            "moduleIds": "deterministic",
            "removeAvailableModules": true,
            "sideEffects": "true"
        })
    );
}

#[test]
fn scalar_sections() {
    let wire = translate_fixture();
    assert_eq!(wire["mode"], "production");
    assert_eq!(wire["context"], "/srv/webapp");
    assert_eq!(wire["target"], json!(["web", "es2017"]));
    assert_eq!(wire["externals"], json!({ "react": "react" }));
    assert_eq!(wire["externalsType"], "module");
    assert_eq!(wire["devtool"], "source-map");
    assert_eq!(wire["stats"], json!({ "colors": true }));
    assert_eq!(wire["devServer"], json!({ "hot": false }));
    assert_eq!(wire["node"], json!({ "dirname": "false" }));
    assert_eq!(
        wire["experiments"],
        json!({ "lazyCompilation": false, "incrementalRebuild": true })
    );
    assert_eq!(
        wire["snapshot"],
        json!({
            "resolve": { "timestamp": true, "hash": false },
            "module": { "timestamp": false, "hash": true }
        })
    );
    assert_eq!(wire["cache"]["type"], "memory");
    assert_eq!(wire["cache"]["buildDependencies"], json!([]));
    assert_eq!(
        wire["builtins"],
        json!({ "define": { "process.env.NODE_ENV": "\"production\"" } })
    );
    assert_eq!(
        wire["resolve"],
        json!({ "extensions": [".tsx", ".ts", ".js"], "alias": { "@": "./src" } })
    );
    assert_eq!(wire["output"]["publicPath"], "/static/");
    assert_eq!(wire["output"]["library"], json!({ "type": "module" }));
}

#[test]
fn entries_keep_order_and_runtime() {
    let compiler = CompilerHandle::new("webapp");
    let canonical = translate_json(FIXTURE, &compiler).unwrap();
    let names: Vec<&str> = canonical.entry.keys().map(String::as_str).collect();
    assert_eq!(names, ["main", "worker", "admin"]);

    let wire = serde_json::to_value(&canonical).unwrap();
    assert_eq!(wire["entry"]["worker"], json!({ "import": ["./src/worker.ts"] }));
    assert_eq!(
        wire["entry"]["admin"],
        json!({
            "import": ["./src/admin/index.tsx", "./src/admin/polyfills.ts"],
            "runtime": "admin-runtime"
        })
    );

    let text = serde_json::to_string(&canonical).unwrap();
    let main = text.find("\"main\"").unwrap();
    let worker = text.find("\"worker\"").unwrap();
    let admin = text.find("\"admin\"").unwrap();
    assert!(main < worker && worker < admin);
}

#[test]
fn from_file_matches_from_json() {
    let compiler = CompilerHandle::new("webapp");
    let translator = Translator::new(&compiler);
    let from_file = NormalizedOptions::from_file(fixture_path()).unwrap();
    let from_json = NormalizedOptions::from_json(FIXTURE).unwrap();
    assert_eq!(
        serde_json::to_string(&translator.translate(&from_file).unwrap()).unwrap(),
        serde_json::to_string(&translator.translate(&from_json).unwrap()).unwrap()
    );
}

#[test]
fn missing_file_is_io_error() {
    let err = NormalizedOptions::from_file("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, CanonError::Io(_)));
}

#[test]
fn split_chunks_false_is_absent() {
    let mut value: Value = serde_json::from_str(FIXTURE).unwrap();
    value["optimization"]["splitChunks"] = json!(false);
    let options = NormalizedOptions::from_json_value(value).unwrap();
    let compiler = CompilerHandle::new("webapp");
    let canonical = Translator::new(&compiler).translate(&options).unwrap();
    let wire = serde_json::to_value(canonical).unwrap();
    assert!(wire["optimization"].get("splitChunks").is_none());
}

#[test]
fn devtool_false_becomes_empty_and_skips_source_map() {
    let mut value: Value = serde_json::from_str(FIXTURE).unwrap();
    value["devtool"] = json!(false);
    let options = NormalizedOptions::from_json_value(value).unwrap();
    let compiler = CompilerHandle::new("webapp");
    let canonical = Translator::new(&compiler).translate(&options).unwrap();
    assert_eq!(canonical.devtool, "");
    let swc = &canonical.module.rules[2].uses[0];
    assert_eq!(
        swc.options.as_deref(),
        Some("{\"jsc\":{\"parser\":{\"syntax\":\"typescript\"}}}")
    );
}

#[test]
fn missing_default_rules_rejected() {
    let mut value: Value = serde_json::from_str(FIXTURE).unwrap();
    value["module"]
        .as_object_mut()
        .unwrap()
        .remove("defaultRules");
    let compiler = CompilerHandle::new("webapp");
    let err = translate_json(&value.to_string(), &compiler).unwrap_err();
    assert_eq!(
        err.to_string(),
        "missing required option(s) after defaulting in 'module': defaultRules"
    );
}

#[test]
fn unsupported_condition_rejected_on_load() {
    let mut value: Value = serde_json::from_str(FIXTURE).unwrap();
    value["module"]["rules"][0]["include"] = json!({ "and": [true] });
    let err = NormalizedOptions::from_json_value(value).unwrap_err();
    assert!(matches!(err, CanonError::Json(_)));
    assert!(err.to_string().contains("unsupported condition shape: boolean `true`"));
}

#[test]
fn devtool_true_rejected_on_load() {
    let mut value: Value = serde_json::from_str(FIXTURE).unwrap();
    value["devtool"] = json!(true);
    assert!(NormalizedOptions::from_json_value(value).is_err());
}

#[test]
fn text_and_value_loaders_agree_on_key_order() {
    let mut value: Value = serde_json::from_str(FIXTURE).unwrap();
    value["entry"] = json!({
        "zeta": { "import": ["./z.js"] },
        "alpha": { "import": ["./a.js"] },
        "mid": { "import": ["./m.js"] }
    });
    value["optimization"]["splitChunks"]["cacheGroups"] = json!({
        "zeta": { "priority": 1 },
        "alpha": {},
        "mid": { "name": "mid" }
    });
    let text = value.to_string();

    let from_text = NormalizedOptions::from_json(&text).unwrap();
    let from_value = NormalizedOptions::from_json_value(value).unwrap();
    let compiler = CompilerHandle::new("webapp");
    let translator = Translator::new(&compiler);
    let via_text = translator.translate(&from_text).unwrap();
    let via_value = translator.translate(&from_value).unwrap();

    for canonical in [&via_text, &via_value] {
        let entries: Vec<&str> = canonical.entry.keys().map(String::as_str).collect();
        assert_eq!(entries, ["zeta", "alpha", "mid"]);
        let groups: Vec<&str> = canonical
            .optimization
            .split_chunks
            .as_ref()
            .unwrap()
            .cache_groups
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(groups, ["zeta", "alpha", "mid"]);
    }
    assert_eq!(
        serde_json::to_string(&via_text).unwrap(),
        serde_json::to_string(&via_value).unwrap()
    );
}

#[test]
fn null_condition_field_rejected_on_load() {
    let mut value: Value = serde_json::from_str(FIXTURE).unwrap();
    value["module"]["rules"][0]["test"] = Value::Null;
    let err = NormalizedOptions::from_json_value(value).unwrap_err();
    assert!(matches!(err, CanonError::Json(_)));
    assert!(err.to_string().contains("unsupported condition shape: null"));
}
