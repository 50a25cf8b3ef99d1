use std::path::PathBuf;

use recap_store::ObjectStore;

use crate::{
    llm::client::CompletionClient,
    llm::transcriber::Transcriber,
    media::AudioFetcher,
    notify::Notifier,
    summarizer::{MapReduceSummarizer, SummarizeConfig},
    JobProcessor,
};

pub struct JobProcessorBuilder<F = (), T = (), C = (), N = (), O = ()> {
    workdir: PathBuf,
    fetcher: F,
    transcriber: T,
    completion_client: C,
    notifier: N,
    store: O,
    summarize_config: SummarizeConfig,
}

impl JobProcessorBuilder {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            fetcher: (),
            transcriber: (),
            completion_client: (),
            notifier: (),
            store: (),
            summarize_config: SummarizeConfig::default(),
        }
    }
}

impl<F, T, C, N, O> JobProcessorBuilder<F, T, C, N, O> {
    pub fn fetcher<F2: AudioFetcher + Send + Sync + 'static>(
        self,
        fetcher: F2,
    ) -> JobProcessorBuilder<F2, T, C, N, O> {
        JobProcessorBuilder {
            workdir: self.workdir,
            fetcher,
            transcriber: self.transcriber,
            completion_client: self.completion_client,
            notifier: self.notifier,
            store: self.store,
            summarize_config: self.summarize_config,
        }
    }

    pub fn transcriber<T2: Transcriber + Send + Sync + 'static>(
        self,
        transcriber: T2,
    ) -> JobProcessorBuilder<F, T2, C, N, O> {
        JobProcessorBuilder {
            workdir: self.workdir,
            fetcher: self.fetcher,
            transcriber,
            completion_client: self.completion_client,
            notifier: self.notifier,
            store: self.store,
            summarize_config: self.summarize_config,
        }
    }

    pub fn completion_client<C2: CompletionClient + Send + Sync + 'static>(
        self,
        completion_client: C2,
    ) -> JobProcessorBuilder<F, T, C2, N, O> {
        JobProcessorBuilder {
            workdir: self.workdir,
            fetcher: self.fetcher,
            transcriber: self.transcriber,
            completion_client,
            notifier: self.notifier,
            store: self.store,
            summarize_config: self.summarize_config,
        }
    }

    pub fn notifier<N2: Notifier + Send + Sync + 'static>(
        self,
        notifier: N2,
    ) -> JobProcessorBuilder<F, T, C, N2, O> {
        JobProcessorBuilder {
            workdir: self.workdir,
            fetcher: self.fetcher,
            transcriber: self.transcriber,
            completion_client: self.completion_client,
            notifier,
            store: self.store,
            summarize_config: self.summarize_config,
        }
    }

    pub fn store<O2: ObjectStore + Send + Sync + 'static>(
        self,
        store: O2,
    ) -> JobProcessorBuilder<F, T, C, N, O2> {
        JobProcessorBuilder {
            workdir: self.workdir,
            fetcher: self.fetcher,
            transcriber: self.transcriber,
            completion_client: self.completion_client,
            notifier: self.notifier,
            store,
            summarize_config: self.summarize_config,
        }
    }

    pub fn summarize_config(mut self, summarize_config: SummarizeConfig) -> Self {
        self.summarize_config = summarize_config;
        self
    }
}

impl<F, T, C, N, O> JobProcessorBuilder<F, T, C, N, O>
where
    F: AudioFetcher + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    C: CompletionClient + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
    O: ObjectStore + Send + Sync + 'static,
{
    pub fn build(self) -> JobProcessor<F, T, C, N, O> {
        JobProcessor {
            workdir: self.workdir,
            fetcher: self.fetcher,
            transcriber: self.transcriber,
            summarizer: MapReduceSummarizer::new(self.completion_client)
                .with_config(self.summarize_config),
            notifier: self.notifier,
            store: self.store,
        }
    }
}
