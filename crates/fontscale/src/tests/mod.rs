mod batch;
mod manifest;
mod scale;

pub(crate) const SAMPLE_MANIFEST: &str = r#"<resources>
    <fonts>
        <font id="TimeFont" filename="Ubuntu-Bold-60.fnt" />
        <font id="DateFont" filename="Ubuntu-Bold-24.fnt" />
        <font id="HeartRateFont" filename="Roboto-Condensed-18.fnt" />
    </fonts>
    <jsonData id="ScreenResolutions">{
        "reference": { "resolution": [280, 280], "shape": "round" },
        "targets": [
            { "resolution": [454, 454], "shape": "round" },
            { "resolution": [148, 205], "shape": "rectangle" }
        ]
    }</jsonData>
    <jsonData id="DefaultCharset">"0-9"</jsonData>
    <jsonData id="FontCharsets">[
        { "fontId": "HeartRateFont", "fontCharset": "0123456789" }
    ]</jsonData>
</resources>
"#;
