//! # Pool de Workers
//! src/server/pool.rs
//!
//! Cantidad fija de threads que toman trabajos de una cola acotada
//! (`sync_channel`). Cada worker atiende una conexión a la vez, de principio
//! a fin. Con la cola llena, `execute` bloquea al llamador: el accept loop
//! deja de aceptar hasta que un worker se libera (control de admisión).

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use tracing::{debug, error};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Pool de threads con cola acotada
pub struct WorkerPool {
    workers: Vec<Worker>,
    sender: Option<SyncSender<Job>>,
}

struct Worker {
    id: usize,
    thread: Option<JoinHandle<()>>,
}

impl Worker {
    fn spawn(id: usize, receiver: Arc<Mutex<Receiver<Job>>>) -> std::io::Result<Self> {
        let thread = thread::Builder::new()
            .name(format!("worker-{}", id))
            .spawn(move || Self::run(id, receiver))?;

        Ok(Self {
            id,
            thread: Some(thread),
        })
    }

    /// Loop principal del worker
    fn run(id: usize, receiver: Arc<Mutex<Receiver<Job>>>) {
        loop {
            // El lock se suelta apenas se recibe el trabajo
            let message = match receiver.lock() {
                Ok(guard) => guard.recv(),
                Err(poisoned) => poisoned.into_inner().recv(),
            };

            let Ok(job) = message else {
                debug!(worker = id, "cola cerrada, worker terminando");
                break;
            };

            // Un panic en una conexión no debe matar al worker
            if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
                error!(worker = id, "panic procesando una conexión");
            }
        }
    }
}

impl WorkerPool {
    /// Crea el pool con `size` workers y una cola de `queue_capacity` trabajos
    ///
    /// # Errores
    ///
    /// Falla si el sistema no puede crear los threads.
    pub fn new(size: usize, queue_capacity: usize) -> std::io::Result<Self> {
        let (sender, receiver) = mpsc::sync_channel::<Job>(queue_capacity);
        let receiver = Arc::new(Mutex::new(receiver));

        let workers = (0..size.max(1))
            .map(|id| Worker::spawn(id, Arc::clone(&receiver)))
            .collect::<std::io::Result<Vec<_>>>()?;

        Ok(Self {
            workers,
            sender: Some(sender),
        })
    }

    /// Encola un trabajo; bloquea si la cola está llena
    pub fn execute<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let Some(sender) = &self.sender else {
            return;
        };
        if sender.send(Box::new(job)).is_err() {
            error!("no hay workers disponibles: la cola está cerrada");
        }
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }
}

impl Drop for WorkerPool {
    /// Cierra la cola y espera a que los workers terminen lo pendiente
    fn drop(&mut self) {
        drop(self.sender.take());

        for worker in &mut self.workers {
            if let Some(thread) = worker.thread.take() {
                if thread.join().is_err() {
                    error!(worker = worker.id, "error esperando al worker");
                }
            }
        }
    }
}
