mod frame;
mod index;
mod vertex;

pub use frame::*;
pub use index::*;
pub use vertex::*;

use crate::{DownloadBufferError, FixedSizeBufferWrapperError};

/// A trait to wrap a [`wgpu::Buffer`].
pub trait BufferWrapper {
    /// The default usages.
    const DEFAULT_USAGES: wgpu::BufferUsages = wgpu::BufferUsages::from_bits_retain(
        wgpu::BufferUsages::COPY_DST.bits() | wgpu::BufferUsages::COPY_SRC.bits(),
    );

    /// Get the buffer.
    fn buffer(&self) -> &wgpu::Buffer;
}

impl BufferWrapper for wgpu::Buffer {
    fn buffer(&self) -> &wgpu::Buffer {
        self
    }
}

/// A [`BufferWrapper`] with a fixed size of one [`FixedSizeBufferWrapper::Pod`].
pub trait FixedSizeBufferWrapper: BufferWrapper + TryFrom<wgpu::Buffer> {
    /// The POD element type.
    type Pod: bytemuck::Pod;

    /// Check if the size of `buffer` matches [`FixedSizeBufferWrapper::Pod`].
    fn verify_buffer_size(buffer: &wgpu::Buffer) -> Result<(), FixedSizeBufferWrapperError> {
        let expected_size = std::mem::size_of::<Self::Pod>() as wgpu::BufferAddress;
        match buffer.size() == expected_size {
            true => Ok(()),
            false => Err(FixedSizeBufferWrapperError::BufferSizeMismatched {
                buffer_size: buffer.size(),
                expected_size,
            }),
        }
    }
}

/// A [`BufferWrapper`] whose content can be read back to the CPU.
///
/// The buffer must have [`wgpu::BufferUsages::COPY_SRC`].
#[async_trait::async_trait(?Send)]
pub trait DownloadableBufferWrapper: BufferWrapper {
    /// Download the buffer as a [`Vec`] of `T`.
    async fn download<T: bytemuck::Pod>(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) -> Result<Vec<T>, DownloadBufferError> {
        let source = self.buffer();
        let size = source.size();

        let staging = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Download Staging Buffer"),
            size,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Download Command Encoder"),
        });
        encoder.copy_buffer_to_buffer(source, 0, &staging, 0, size);
        queue.submit(Some(encoder.finish()));

        let (tx, rx) = oneshot::channel();
        staging
            .slice(..)
            .map_async(wgpu::MapMode::Read, move |result| {
                if let Err(e) = tx.send(result) {
                    log::error!("Error occurred while sending buffer download data: {e:?}");
                }
            });
        device.poll(wgpu::PollType::wait_indefinitely())?;
        rx.await??;

        let data = {
            let view = staging.slice(..).get_mapped_range();
            bytemuck::allocation::pod_collect_to_vec(&view)
        };
        staging.unmap();

        Ok(data)
    }
}

impl<T: BufferWrapper> DownloadableBufferWrapper for T {}
