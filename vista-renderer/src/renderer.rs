//! [`TemplateRenderer`] — resolve a template for a view and render it.

use std::sync::Arc;

use vista_core::types::RenderOptions;
use vista_core::view::View;

use crate::error::{MissingTemplateError, RenderError};
use crate::finder::TemplateFinder;
use crate::scope::Scope;

/// How many templates deep nested `render(...)` calls may go.
pub const MAX_RENDER_DEPTH: usize = 16;

/// Renders one template or partial on behalf of a view.
///
/// Lookup is delegated to the [`TemplateFinder`]; the found template is
/// rendered with a fresh [`Scope`] built from the view and the options'
/// locals. The renderer never mutates itself, so one instance can be
/// rendered any number of times.
pub struct TemplateRenderer {
    view: Arc<dyn View>,
    options: RenderOptions,
    finder: Arc<dyn TemplateFinder>,
    depth: usize,
}

impl TemplateRenderer {
    pub fn new(view: Arc<dyn View>, options: RenderOptions, finder: Arc<dyn TemplateFinder>) -> Self {
        TemplateRenderer {
            view,
            options,
            finder,
            depth: 0,
        }
    }

    /// Nesting level of this render; 0 for a top-level render.
    pub(crate) fn at_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Find the template and render it, verbatim.
    ///
    /// Fails with [`RenderError::MissingTemplate`] when the finder has no match;
    /// finder and template errors are returned as-is.
    pub fn render(&self) -> Result<String, RenderError> {
        if self.depth > MAX_RENDER_DEPTH {
            return Err(RenderError::RecursionLimit { depth: MAX_RENDER_DEPTH });
        }

        let class = self.view.class();
        let template = match self.finder.find(class, &self.options)? {
            Some(template) => template,
            None => return Err(self.missing_template_error().into()),
        };

        tracing::debug!(view = %class.name, depth = self.depth, "rendering");
        template.render(&self.scope())
    }

    fn scope(&self) -> Scope {
        Scope::new(Arc::clone(&self.view), self.options.locals.clone())
            .with_nesting(Arc::clone(&self.finder), self.depth)
    }

    fn missing_template_error(&self) -> MissingTemplateError {
        MissingTemplateError::new(
            self.options.missing_name().cloned(),
            self.options.format.clone(),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use rstest::rstest;
    use serde_json::json;
    use vista_core::types::{Format, Locals, TemplateName};
    use vista_core::view::{StaticView, ViewClass};

    use crate::template::Template;

    /// Records every scope it is rendered with and echoes its locals.
    #[derive(Debug, Default)]
    struct EchoTemplate {
        calls: AtomicUsize,
        seen: Mutex<Vec<Locals>>,
    }

    impl Template for EchoTemplate {
        fn render(&self, scope: &Scope) -> Result<String, RenderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(scope.locals().clone());
            Ok(format!("echo:{}", serde_json::Value::Object(scope.locals().clone())))
        }
    }

    /// Returns a fixed template (or nothing) and records what it was asked for.
    struct StubFinder {
        template: Option<Arc<EchoTemplate>>,
        asked: Mutex<Vec<(String, RenderOptions)>>,
    }

    impl StubFinder {
        fn returning(template: Option<Arc<EchoTemplate>>) -> Arc<Self> {
            Arc::new(StubFinder { template, asked: Mutex::new(vec![]) })
        }
    }

    impl TemplateFinder for StubFinder {
        fn find(
            &self,
            class: &ViewClass,
            options: &RenderOptions,
        ) -> Result<Option<Arc<dyn Template>>, RenderError> {
            self.asked.lock().unwrap().push((class.name.clone(), options.clone()));
            Ok(self.template.clone().map(|t| t as Arc<dyn Template>))
        }
    }

    fn view() -> Arc<dyn View> {
        Arc::new(StaticView::new(ViewClass::new("Articles::Show", "/code/templates")))
    }

    fn missing(err: RenderError) -> MissingTemplateError {
        match err {
            RenderError::MissingTemplate(inner) => inner,
            other => panic!("expected MissingTemplate, got: {other}"),
        }
    }

    #[test]
    fn found_template_output_is_returned_verbatim() {
        let template = Arc::new(EchoTemplate::default());
        let finder = StubFinder::returning(Some(Arc::clone(&template)));
        let options = RenderOptions::template("articles/show")
            .with_format("html")
            .with_local("article", json!({ "title": "A" }));

        let out = TemplateRenderer::new(view(), options.clone(), finder.clone()).render().unwrap();

        assert_eq!(out, r#"echo:{"article":{"title":"A"}}"#);
        assert_eq!(template.calls.load(Ordering::SeqCst), 1);
        let asked = finder.asked.lock().unwrap();
        assert_eq!(asked.len(), 1);
        assert_eq!(asked[0].0, "Articles::Show");
        assert_eq!(asked[0].1, options, "finder must receive the full options");
    }

    #[test]
    fn absent_locals_render_with_empty_scope() {
        let template = Arc::new(EchoTemplate::default());
        let finder = StubFinder::returning(Some(Arc::clone(&template)));
        let out = TemplateRenderer::new(view(), RenderOptions::template("x"), finder)
            .render()
            .unwrap();
        assert_eq!(out, "echo:{}");
    }

    #[test]
    fn each_render_builds_a_fresh_scope() {
        let template = Arc::new(EchoTemplate::default());
        let finder = StubFinder::returning(Some(Arc::clone(&template)));
        let renderer = TemplateRenderer::new(view(), RenderOptions::template("x").with_local("n", 1), finder);

        renderer.render().unwrap();
        renderer.render().unwrap();

        assert_eq!(template.calls.load(Ordering::SeqCst), 2);
        let seen = template.seen.lock().unwrap();
        assert_eq!(seen[0], seen[1]);
    }

    #[rstest]
    #[case("scenario_2", Some("missing/one"), None, Some("html"), Some("missing/one"))]
    #[case("scenario_3", None, Some("shared/header"), None, Some("shared/header"))]
    #[case("scenario_4", None, None, None, None)]
    #[case("template_beats_partial", Some("articles/show"), Some("shared/header"), Some("json"), Some("articles/show"))]
    fn missing_template_names_and_formats(
        #[case] label: &str,
        #[case] template: Option<&str>,
        #[case] partial: Option<&str>,
        #[case] format: Option<&str>,
        #[case] expected_name: Option<&str>,
    ) {
        let options = RenderOptions {
            template: template.map(TemplateName::from),
            partial: partial.map(TemplateName::from),
            format: format.map(Format::from),
            locals: None,
        };
        let err = TemplateRenderer::new(view(), options, StubFinder::returning(None))
            .render()
            .unwrap_err();
        let err = missing(err);
        assert_eq!(err.name.as_ref().map(TemplateName::as_str), expected_name, "[{label}] name");
        assert_eq!(err.format.as_ref().map(Format::as_str), format, "[{label}] format");
    }

    #[test]
    fn missing_template_asks_the_finder_once() {
        let finder = StubFinder::returning(None);
        let err = TemplateRenderer::new(view(), RenderOptions::partial("shared/header"), finder.clone())
            .render()
            .unwrap_err();
        assert!(matches!(err, RenderError::MissingTemplate(_)));
        let asked = finder.asked.lock().unwrap();
        assert_eq!(asked.len(), 1, "no separate partial lookup");
        assert_eq!(asked[0].1, RenderOptions::partial("shared/header"));
    }

    #[test]
    fn finder_errors_propagate_unchanged() {
        struct BrokenFinder;
        impl TemplateFinder for BrokenFinder {
            fn find(
                &self,
                _class: &ViewClass,
                _options: &RenderOptions,
            ) -> Result<Option<Arc<dyn Template>>, RenderError> {
                Err(RenderError::Io {
                    path: "/code/templates".into(),
                    source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
                })
            }
        }

        let err = TemplateRenderer::new(view(), RenderOptions::template("x"), Arc::new(BrokenFinder))
            .render()
            .unwrap_err();
        assert!(matches!(err, RenderError::Io { .. }), "got: {err}");
    }

    #[test]
    fn one_renderer_serves_concurrent_renders() {
        let template = Arc::new(EchoTemplate::default());
        let finder = StubFinder::returning(Some(Arc::clone(&template)));
        let renderer = Arc::new(TemplateRenderer::new(
            view(),
            RenderOptions::template("x").with_local("n", 7),
            finder.clone(),
        ));

        let outputs: Vec<String> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let renderer = Arc::clone(&renderer);
                    s.spawn(move || renderer.render().unwrap())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(outputs.iter().all(|out| out == r#"echo:{"n":7}"#), "got: {outputs:?}");
        assert_eq!(template.calls.load(Ordering::SeqCst), 8);
        assert_eq!(finder.asked.lock().unwrap().len(), 8);
    }

    #[test]
    fn depth_beyond_limit_is_refused() {
        let finder = StubFinder::returning(Some(Arc::new(EchoTemplate::default())));
        let err = TemplateRenderer::new(view(), RenderOptions::template("x"), finder.clone())
            .at_depth(MAX_RENDER_DEPTH + 1)
            .render()
            .unwrap_err();
        assert!(matches!(err, RenderError::RecursionLimit { .. }), "got: {err}");
        assert!(finder.asked.lock().unwrap().is_empty());
    }
}
