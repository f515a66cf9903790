use crate::model::Framework;

/// Per-framework routing conventions consulted by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteConvention {
    /// Handler parameters injected by the framework, never sent by a client
    pub implicit_params: &'static [&'static str],
    /// Decorator that takes a `methods=[...]` list, if the framework has one
    pub multi_method_decorator: Option<&'static str>,
    /// Keywords that carry the path when it is not positional
    pub path_keywords: &'static [&'static str],
    /// Decorator keyword naming the response model
    pub response_keyword: Option<&'static str>,
}

const FASTAPI: RouteConvention = RouteConvention {
    implicit_params: &["self", "cls", "request", "response"],
    multi_method_decorator: Some("api_route"),
    path_keywords: &["path"],
    response_keyword: Some("response_model"),
};

const DJANGO_NINJA: RouteConvention = RouteConvention {
    implicit_params: &["self", "cls", "request"],
    multi_method_decorator: None,
    path_keywords: &["path"],
    response_keyword: Some("response"),
};

const FLASK: RouteConvention = RouteConvention {
    implicit_params: &["self", "cls"],
    multi_method_decorator: Some("route"),
    path_keywords: &["rule"],
    response_keyword: None,
};

impl Framework {
    pub fn convention(&self) -> &'static RouteConvention {
        match self {
            Framework::FastApi => &FASTAPI,
            Framework::DjangoNinja => &DJANGO_NINJA,
            Framework::Flask => &FLASK,
        }
    }
}

impl RouteConvention {
    pub fn is_implicit(&self, name: &str) -> bool {
        self.implicit_params.contains(&name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_is_implicit_except_for_flask() {
        assert!(Framework::FastApi.convention().is_implicit("request"));
        assert!(Framework::DjangoNinja.convention().is_implicit("request"));
        assert!(!Framework::Flask.convention().is_implicit("request"));
    }

    #[test]
    fn only_fastapi_and_flask_have_multi_method_routes() {
        assert_eq!(
            Framework::Flask.convention().multi_method_decorator,
            Some("route")
        );
        assert!(Framework::DjangoNinja
            .convention()
            .multi_method_decorator
            .is_none());
    }
}
