use math_question_gen::models::TaggedQuestion;
use math_question_gen::{logger, App, Config, GenerationMode, QuestionExport};

fn fallback_config(dir: &std::path::Path) -> Config {
    Config {
        openai_api_key: None,
        output_dir: dir.join("output"),
        seed: Some(99),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_fallback_run_writes_all_outputs() {
    logger::init();

    let dir = tempfile::tempdir().expect("创建临时目录失败");
    let config = fallback_config(dir.path());

    let report = App::initialize(config.clone())
        .await
        .expect("初始化失败")
        .run()
        .await
        .expect("运行失败");

    assert_eq!(report.mode, GenerationMode::Fallback);
    assert_eq!(report.document_path, config.document_path());
    assert_eq!(report.diagram_path, config.diagram_path());

    let bytes = std::fs::read(&report.document_path).expect("文档应该存在");
    let docx_json = docx_rs::read_docx(&bytes).expect("文档应该能被读回").json();
    for expected in [
        "Math Question Generation — Output",
        "Heading1",
        "@title Combinatorics — Campus Gear Choices",
        "@title Packed Spheres — Box Dimensions",
        "Diagram:",
        "3657600",
    ] {
        assert!(docx_json.contains(expected), "文档中缺少 {:?}", expected);
    }

    let png = image::open(&report.diagram_path).expect("图示应该是有效的 PNG");
    assert_eq!((png.width(), png.height()), (800, 300));

    let export_path = report.export_path.expect("默认应导出 TOML");
    let content = std::fs::read_to_string(export_path).unwrap();
    let export: QuestionExport = toml::from_str(&content).unwrap();
    assert_eq!(export.mode, GenerationMode::Fallback);
    assert_eq!(export.questions.len(), 2);

    for record in &export.questions {
        let parsed = TaggedQuestion::parse(&record.raw_text).unwrap();
        assert!(parsed.validate().is_ok());
        assert_eq!(record.parsed.as_ref(), Some(&parsed));
    }
}

#[tokio::test]
async fn test_export_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        export_toml: false,
        ..fallback_config(dir.path())
    };

    let report = App::initialize(config.clone())
        .await
        .unwrap()
        .run()
        .await
        .unwrap();

    assert!(report.export_path.is_none());
    assert!(!config.export_path().exists());
    assert!(report.document_path.exists());
}

/// 需要真实 API 密钥：OPENAI_API_KEY=sk-... cargo test -- --ignored
#[tokio::test]
#[ignore]
async fn test_llm_run() {
    logger::init();

    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        output_dir: dir.path().join("output"),
        ..Config::from_env()
    };
    assert_eq!(config.generation_mode(), GenerationMode::Llm, "需要设置 OPENAI_API_KEY");

    let report = App::initialize(config).await.unwrap().run().await.unwrap();
    println!("题目来源: {}", report.mode);
    assert!(report.document_path.exists());
}
