use std::sync::Arc;

use smallvec::SmallVec;

use crate::message::Message;

/// Transformation applied to every message before it enters the queue.
///
/// Returning `None` suppresses the message: it is dropped silently and no
/// later interceptor runs. Implementations must be stateless or internally
/// synchronized, `intercept` can be called from any producer thread.
pub trait MessageInterceptor: Send + Sync {
    fn intercept(&self, message: Message) -> Option<Message>;
}

pub(crate) type InterceptorList = SmallVec<[Arc<dyn MessageInterceptor>; 4]>;

/// Ordered chain of interceptors, immutable after construction.
pub(crate) struct InterceptorChain {
    interceptors: InterceptorList,
}

impl InterceptorChain {
    pub(crate) fn new(interceptors: InterceptorList) -> Self {
        Self { interceptors }
    }

    /// Applies interceptors in registration order, stopping at the first
    /// suppression.
    pub(crate) fn run(&self, mut message: Message) -> Option<Message> {
        for interceptor in &self.interceptors {
            message = match interceptor.intercept(message) {
                Some(message) => message,
                None => {
                    log::debug!("message suppressed by interceptor");
                    return None;
                }
            };
        }

        Some(message)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use smallvec::smallvec;

    use super::*;

    struct Tag(&'static str);

    impl MessageInterceptor for Tag {
        fn intercept(&self, message: Message) -> Option<Message> {
            let trail = match message.properties().get("trail") {
                Some(prev) => format!("{},{}", prev.as_str().unwrap_or(""), self.0),
                None => self.0.to_string(),
            };

            Some(message.into_builder().property("trail", trail).build())
        }
    }

    struct DropAll {
        calls: AtomicUsize,
    }

    impl MessageInterceptor for DropAll {
        fn intercept(&self, _message: Message) -> Option<Message> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            None
        }
    }

    #[test]
    fn runs_in_registration_order() {
        let chain = InterceptorChain::new(smallvec![
            Arc::new(Tag("first")) as Arc<dyn MessageInterceptor>,
            Arc::new(Tag("second")) as Arc<dyn MessageInterceptor>,
        ]);

        let out = chain.run(Message::track("t").build()).unwrap();

        assert_eq!(out.properties()["trail"], "first,second");
    }

    #[test]
    fn suppression_stops_the_chain() {
        let head = Arc::new(DropAll {
            calls: AtomicUsize::new(0),
        });
        let tail = Arc::new(DropAll {
            calls: AtomicUsize::new(0),
        });

        let chain = InterceptorChain::new(smallvec![
            head.clone() as Arc<dyn MessageInterceptor>,
            tail.clone() as Arc<dyn MessageInterceptor>,
        ]);

        assert!(chain.run(Message::track("t").build()).is_none());
        assert_eq!(head.calls.load(Ordering::SeqCst), 1);
        assert_eq!(tail.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn empty_chain_passes_message_through() {
        let chain = InterceptorChain::new(InterceptorList::new());
        let msg = Message::identify().message_id("m").build();

        assert_eq!(chain.run(msg.clone()), Some(msg));
    }
}
