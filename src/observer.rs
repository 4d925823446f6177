//! Per-sample observability hook
//!
//! The decoder hands every record's metadata to a [`SampleObserver`] once
//! the record has been read. Nothing in the decoder depends on what the
//! observer does with it.

use crate::patch::{HeaderInfo, SampleInfo};

/// Receives decoded metadata while a patch is being read
pub trait SampleObserver {
    /// Called once after the header validated
    fn on_header(&mut self, _header: &HeaderInfo) {}

    /// Called for each sample record, in file order
    fn on_sample(&mut self, index: usize, info: &SampleInfo);
}

/// Emits one `tracing` debug event per header and sample
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SampleObserver for TracingObserver {
    fn on_header(&mut self, header: &HeaderInfo) {
        tracing::debug!(
            instruments = header.instrument_count,
            layers = header.layer_count,
            samples = header.sample_count,
            "patch header"
        );
    }

    fn on_sample(&mut self, index: usize, info: &SampleInfo) {
        tracing::debug!(
            index,
            fractions = info.fractions,
            data_length = info.data_length,
            loop_start = info.loop_start,
            loop_end = info.loop_end,
            sample_rate = info.sample_rate,
            low_freq = info.low_freq,
            high_freq = info.high_freq,
            root_freq = info.root_freq,
            stereo_balance = info.stereo_balance,
            tremolo_sweep = info.tremolo_sweep,
            tremolo_rate = info.tremolo_rate,
            tremolo_depth = info.tremolo_depth,
            vibrato_sweep = info.vibrato_sweep,
            vibrato_rate = info.vibrato_rate,
            vibrato_depth = info.vibrato_depth,
            modes = ?info.modes,
            scale_freq = info.scale_freq,
            scale_factor = info.scale_factor,
            "sample record"
        );
    }
}

/// Discards everything
impl SampleObserver for () {
    fn on_sample(&mut self, _index: usize, _info: &SampleInfo) {}
}

/// Collects sample metadata in file order
impl SampleObserver for Vec<SampleInfo> {
    fn on_sample(&mut self, _index: usize, info: &SampleInfo) {
        self.push(*info);
    }
}

/// Forwards to both observers, first then second
impl<A, B> SampleObserver for (A, B)
where
    A: SampleObserver,
    B: SampleObserver,
{
    fn on_header(&mut self, header: &HeaderInfo) {
        self.0.on_header(header);
        self.1.on_header(header);
    }

    fn on_sample(&mut self, index: usize, info: &SampleInfo) {
        self.0.on_sample(index, info);
        self.1.on_sample(index, info);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::test_support::sample_info;

    fn info(data_length: usize) -> SampleInfo {
        sample_info(0x00, data_length)
    }

    #[test]
    fn test_vec_collects_in_order() {
        let mut seen: Vec<SampleInfo> = Vec::new();
        seen.on_sample(0, &info(10));
        seen.on_sample(1, &info(20));
        assert_eq!(
            seen.iter().map(|i| i.data_length).collect::<Vec<_>>(),
            vec![10, 20]
        );
    }

    #[test]
    fn test_pair_forwards_to_both() {
        let mut pair: (Vec<SampleInfo>, Vec<SampleInfo>) = (Vec::new(), Vec::new());
        pair.on_sample(0, &info(8));
        assert_eq!(pair.0.len(), 1);
        assert_eq!(pair.1.len(), 1);
    }

    #[test]
    fn test_tracing_observer_without_subscriber() {
        let mut observer = TracingObserver;
        observer.on_header(&HeaderInfo {
            instrument_count: 1,
            layer_count: 1,
            sample_count: 1,
        });
        observer.on_sample(0, &info(4));
    }
}
