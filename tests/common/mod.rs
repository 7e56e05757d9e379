#![allow(dead_code)]


/// A headless device for GPU tests.
pub struct TestContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl TestContext {
    /// Request a device from the default adapter.
    ///
    /// Tests using this are ignored unless the `gpu-tests` feature is enabled.
    pub fn new() -> Self {
        pollster::block_on(async {
            let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::new_without_display_handle());

            let adapter = instance
                .request_adapter(&wgpu::RequestAdapterOptions::default())
                .await
                .expect("adapter");

            let (device, queue) = adapter
                .request_device(&wgpu::DeviceDescriptor {
                    label: Some("Test Device"),
                    ..Default::default()
                })
                .await
                .expect("device");

            Self { device, queue }
        })
    }
}
