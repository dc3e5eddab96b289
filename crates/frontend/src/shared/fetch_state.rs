/// Состояние загрузки виджета: данные, ошибка и флаг загрузки меняются вместе
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub error: Option<String>,
    pub loading: bool,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            loading: false,
        }
    }
}

impl<T> FetchState<T> {
    /// Nothing selected: drops data and any previous error
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Request sent; previous data stays visible until the response arrives
    pub fn start(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn finish(&mut self, result: Result<T, String>) {
        match result {
            Ok(data) => self.finish_partial(data, None),
            Err(e) => {
                self.loading = false;
                self.data = None;
                self.error = Some(e);
            }
        }
    }

    /// Response assembled from several requests, some of which may have failed
    pub fn finish_partial(&mut self, data: T, error: Option<String>) {
        self.loading = false;
        self.data = Some(data);
        self.error = error;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_drops_stale_error() {
        let mut state = FetchState::<u32>::default();
        state.start();
        state.finish(Err("HTTP error: 500".into()));
        assert_eq!(state.error.as_deref(), Some("HTTP error: 500"));

        state.clear();
        assert_eq!(state, FetchState::default());
    }

    #[test]
    fn test_clear_drops_partial_failure() {
        let mut state = FetchState::<Vec<u32>>::default();
        state.finish_partial(vec![1, 2], Some("Request failed".into()));
        assert_eq!(state.data.as_deref(), Some(&[1, 2][..]));

        state.clear();
        assert!(state.data.is_none());
        assert!(state.error.is_none());
    }

    #[test]
    fn test_start_and_finish() {
        let mut state = FetchState::<u32>::default();
        state.finish(Err("boom".into()));
        state.start();
        assert!(state.loading);
        assert!(state.error.is_none());

        state.finish(Ok(7));
        assert!(!state.loading);
        assert_eq!(state.data, Some(7));
        assert!(state.error.is_none());
    }
}
